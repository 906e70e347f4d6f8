//! Operator permission flags.
//!
//! The flags are declared once in `permission_flags!`, which emits the
//! full record, its partial counterpart and the flag enum so the three can
//! never drift apart.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown permission flag: {0}")]
pub struct UnknownFlag(pub String);

macro_rules! permission_flags {
    ($( $(#[$doc:meta])* $field:ident => $variant:ident, $key:literal, $default:literal; )+) => {
        /// The full operator permission record. Every flag is always present.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct PermissionConfig {
            $( $(#[$doc])* pub $field: bool, )+
        }

        impl Default for PermissionConfig {
            fn default() -> Self {
                Self { $( $field: $default, )+ }
            }
        }

        /// A partial update. `None` leaves the current value untouched.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct PermissionPatch {
            $(
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<bool>,
            )+
        }

        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub enum PermissionFlag {
            $( $variant, )+
        }

        impl PermissionFlag {
            pub const ALL: &'static [PermissionFlag] = &[ $( PermissionFlag::$variant, )+ ];

            /// Field name used in the persisted record.
            pub fn key(self) -> &'static str {
                match self {
                    $( PermissionFlag::$variant => $key, )+
                }
            }

            pub fn default_value(self) -> bool {
                match self {
                    $( PermissionFlag::$variant => $default, )+
                }
            }
        }

        impl FromStr for PermissionFlag {
            type Err = UnknownFlag;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $key => Ok(PermissionFlag::$variant), )+
                    _ => Err(UnknownFlag(s.to_string())),
                }
            }
        }

        impl PermissionConfig {
            pub fn get(&self, flag: PermissionFlag) -> bool {
                match flag {
                    $( PermissionFlag::$variant => self.$field, )+
                }
            }

            pub fn set(&mut self, flag: PermissionFlag, value: bool) {
                match flag {
                    $( PermissionFlag::$variant => self.$field = value, )+
                }
            }

            /// Overlays `patch` on this record in place.
            pub fn apply(&mut self, patch: &PermissionPatch) {
                $(
                    if let Some(value) = patch.$field {
                        self.$field = value;
                    }
                )+
            }
        }

        impl PermissionPatch {
            pub fn get(&self, flag: PermissionFlag) -> Option<bool> {
                match flag {
                    $( PermissionFlag::$variant => self.$field, )+
                }
            }

            pub fn with(mut self, flag: PermissionFlag, value: bool) -> Self {
                match flag {
                    $( PermissionFlag::$variant => self.$field = Some(value), )+
                }
                self
            }

            pub fn is_empty(&self) -> bool {
                true $( && self.$field.is_none() )+
            }
        }
    };
}

permission_flags! {
    /// Metrics panel.
    show_metrics => ShowMetrics, "showMetrics", true;
    /// Alerts panel.
    show_alerts => ShowAlerts, "showAlerts", true;
    /// Filter controls.
    show_filters => ShowFilters, "showFilters", true;
    /// Truck detail drill-down.
    show_truck_details => ShowTruckDetails, "showTruckDetails", true;
    can_edit => CanEdit, "canEdit", false;
    can_import => CanImport, "canImport", false;
    can_export => CanExport, "canExport", false;
    can_delete => CanDelete, "canDelete", false;
    /// Driver identity fields.
    show_driver_info => ShowDriverInfo, "showDriverInfo", true;
    /// Location fields.
    show_location_info => ShowLocationInfo, "showLocationInfo", true;
    /// Historical status log.
    show_status_history => ShowStatusHistory, "showStatusHistory", false;
}

impl PermissionConfig {
    /// Returns a copy with `patch` overlaid.
    pub fn merged(&self, patch: &PermissionPatch) -> Self {
        let mut next = *self;
        next.apply(patch);
        next
    }

    pub fn enabled_flags(&self) -> impl Iterator<Item = PermissionFlag> + '_ {
        PermissionFlag::ALL
            .iter()
            .copied()
            .filter(move |flag| self.get(*flag))
    }
}

impl fmt::Display for PermissionFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
