//! Closed enums for account role and candidacy workflow.
//!
//! Each enum is stored as upper-case TEXT and serialized to the same text, so
//! the wire form, the store form and [`as_str`](Role::as_str) always agree.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

macro_rules! define_text_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The stored / serialized text form.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $text => Ok($name::$variant), )+
                    other => Err(CoreError::Validation(format!(
                        "Unknown {} '{other}'", $label
                    ))),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = CoreError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

define_text_enum! {
    /// Account role. Fixed at creation, never changed by an update.
    ///
    /// `Admin` is never self-assigned: sign-up derives `Builder` or `Coach`
    /// from the profile payload that was supplied.
    Role ("role") {
        Admin => "ADMIN",
        Builder => "BUILDER",
        Coach => "COACH",
    }
}

define_text_enum! {
    /// Candidacy status of an account.
    UserStatus ("status") {
        Candidating => "CANDIDATING",
        Validated => "VALIDATED",
        Deleted => "DELETED",
    }
}

define_text_enum! {
    /// Position of an account in the onboarding workflow.
    UserStep ("step") {
        Preselected => "PRESELECTED",
        AdminMeeting => "ADMIN_MEETING",
        AdminMeetingDone => "ADMIN_MEETING_DONE",
        CoachMeeting => "COACH_MEETING",
        Signing => "SIGNING",
        Active => "ACTIVE",
        Finished => "FINISHED",
        Abandoned => "ABANDONED",
    }
}

impl Default for UserStatus {
    fn default() -> Self {
        Self::Candidating
    }
}

impl Default for UserStep {
    fn default() -> Self {
        Self::Preselected
    }
}

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}
