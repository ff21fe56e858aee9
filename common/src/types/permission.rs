use serde::{Deserialize, Serialize};

/// Runtime permissions the sensor pipelines may ask for.
///
/// # Examples
///
/// ```
/// use common::types::Permission;
///
/// let permission = Permission::try_from("ACCESS_FINE_LOCATION").unwrap();
/// assert_eq!(permission, Permission::FineLocation);
///
/// let permission = Permission::try_from("coarse").unwrap();
/// assert_eq!(permission, Permission::CoarseLocation);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Permission {
    FineLocation,
    CoarseLocation,
}

impl Permission {
    /// Platform identifier of the permission.
    pub fn manifest_name(&self) -> &'static str {
        match self {
            Permission::FineLocation => "android.permission.ACCESS_FINE_LOCATION",
            Permission::CoarseLocation => "android.permission.ACCESS_COARSE_LOCATION",
        }
    }
}

impl TryFrom<&str> for Permission {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower_case_value = value.to_lowercase();
        if lower_case_value.contains("fine") {
            Ok(Self::FineLocation)
        } else if lower_case_value.contains("coarse") {
            Ok(Self::CoarseLocation)
        } else {
            Err(format!("Unknown permission: {}", value))
        }
    }
}

impl TryFrom<String> for Permission {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Permission::try_from(value.as_str())
    }
}

impl From<Permission> for String {
    fn from(value: Permission) -> Self {
        value.manifest_name().to_string()
    }
}

/// Grant status tracked by the permission gate.
///
/// `Unknown -> Requesting -> Granted | Denied`, or `Unknown -> Granted` when the
/// capability check already reports a grant. `Denied` only leaves through a new
/// explicit request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PermissionState {
    #[default]
    Unknown,
    Requesting,
    Granted,
    Denied,
}

impl PermissionState {
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionState::Granted)
    }

    /// True once a prompt has been answered (or skipped through the fast path).
    pub fn is_resolved(&self) -> bool {
        matches!(self, PermissionState::Granted | PermissionState::Denied)
    }
}
