use super::log::AlertLevel;

/// Dashboard controls. None of them drive real hardware; each one only
/// raises alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    LaunchDrone,
    ReturnToBase,
    EmergencyLanding,
    PayloadRelease,
    NewDelivery,
    ViewMissions,
    MaintenanceLog,
}

impl ControlAction {
    pub const ALL: [ControlAction; 7] = [
        ControlAction::LaunchDrone,
        ControlAction::ReturnToBase,
        ControlAction::EmergencyLanding,
        ControlAction::PayloadRelease,
        ControlAction::NewDelivery,
        ControlAction::ViewMissions,
        ControlAction::MaintenanceLog,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ControlAction::LaunchDrone => "Launch Drone",
            ControlAction::ReturnToBase => "Return to Base",
            ControlAction::EmergencyLanding => "Emergency Landing",
            ControlAction::PayloadRelease => "Payload Release",
            ControlAction::NewDelivery => "New Delivery",
            ControlAction::ViewMissions => "View Missions",
            ControlAction::MaintenanceLog => "Maintenance Log",
        }
    }

    /// Alerts raised, in the order they are pushed.
    pub fn alerts(&self) -> &'static [(AlertLevel, &'static str)] {
        match self {
            ControlAction::LaunchDrone => &[
                (AlertLevel::Success, "Drone Launch Initiated!"),
                (AlertLevel::Info, "Route set to Noida. Drone en route."),
            ],
            ControlAction::ReturnToBase => &[(AlertLevel::Warning, "Drone returning to base.")],
            ControlAction::EmergencyLanding => &[(
                AlertLevel::Danger,
                "EMERGENCY LANDING INITIATED! Seek immediate visual.",
            )],
            ControlAction::PayloadRelease => &[(AlertLevel::Success, "Payload released.")],
            ControlAction::NewDelivery => &[(AlertLevel::Info, "New delivery form opened.")],
            ControlAction::ViewMissions => &[(AlertLevel::Info, "Viewing mission logs.")],
            ControlAction::MaintenanceLog => &[(AlertLevel::Info, "Accessing maintenance logs.")],
        }
    }
}
