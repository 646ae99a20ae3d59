//! Enums carried on the wire and their human-readable tokens
//!
//! Every enum travels as its protobuf integer value. Tokens typed by a user
//! are matched case-insensitively against the upper-case names; integers the
//! client does not know render as `UNKNOWN` so newer services never break
//! display.

use thiserror::Error;

/// Name rendered for wire values outside the known set
pub const UNKNOWN: &str = "UNKNOWN";

/// Returned when a user token is not a member of the enum
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {kind} '{value}'")]
pub struct ParseEnumError {
    /// Human label of the enum, e.g. "status"
    pub kind: &'static str,
    /// The token exactly as the user typed it
    pub value: String,
}

/// Mapping between an enum, its wire integer and its token
pub trait WireEnum: Sized + Copy + 'static {
    /// Label used in error messages
    const KIND: &'static str;

    /// All members in wire order
    fn all() -> &'static [Self];

    /// Upper-case token, e.g. `IDLE`
    fn name(self) -> &'static str;

    /// Protobuf integer value
    fn wire(self) -> i32;

    /// Parse a user token, ignoring case
    fn parse(token: &str) -> Result<Self, ParseEnumError> {
        let upper = token.to_uppercase();
        Self::all()
            .iter()
            .copied()
            .find(|v| v.name() == upper)
            .ok_or_else(|| ParseEnumError {
                kind: Self::KIND,
                value: token.to_string(),
            })
    }

    /// Look up a wire value
    fn from_wire(value: i32) -> Option<Self> {
        Self::all().iter().copied().find(|v| v.wire() == value)
    }

    /// Render a wire value, falling back to `UNKNOWN`
    fn format_wire(value: i32) -> &'static str {
        Self::from_wire(value).map(Self::name).unwrap_or(UNKNOWN)
    }
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident = $wire:literal => $token:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl WireEnum for $name {
            const KIND: &'static str = $kind;

            fn all() -> &'static [Self] {
                &[$($name::$variant),+]
            }

            fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $token),+
                }
            }

            fn wire(self) -> i32 {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$name as WireEnum>::parse(s)
            }
        }
    };
}

wire_enum! {
    /// Operational status of a device
    DeviceStatus, "status" {
        Idle = 0 => "IDLE",
        Busy = 1 => "BUSY",
        Offline = 2 => "OFFLINE",
        Maintenance = 3 => "MAINTENANCE",
        Updating = 4 => "UPDATING",
        Recovering = 5 => "RECOVERING",
        Error = 6 => "ERROR",
    }
}

wire_enum! {
    /// Kind of long-running action requested against a device
    ActionType, "action type" {
        SoftwareUpdate = 0 => "SOFTWARE_UPDATE",
        FirmwareUpdate = 1 => "FIRMWARE_UPDATE",
        SystemReboot = 2 => "SYSTEM_REBOOT",
        ConfigurationChange = 3 => "CONFIGURATION_CHANGE",
    }
}

wire_enum! {
    /// Progress of an action
    ActionStatus, "action status" {
        Pending = 0 => "PENDING",
        Running = 1 => "RUNNING",
        /// Terminal
        Completed = 2 => "COMPLETED",
        /// Terminal
        Failed = 3 => "FAILED",
    }
}

impl ActionStatus {
    /// COMPLETED and FAILED never transition further
    pub fn is_terminal(self) -> bool {
        matches!(self, ActionStatus::Completed | ActionStatus::Failed)
    }
}
