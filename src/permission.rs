use strum_macros::Display;

pub const PERMISSION_NOTICE: &str =
    "Location permission is needed to display your location on the map.";

/// Fine and coarse location access on the host platform.
pub trait PermissionProvider {
    fn is_granted(&self) -> bool;
    // The answer comes back later through
    // `TrackingController::on_permission_result`.
    fn request(&mut self);
}

pub trait Notifier {
    fn show_notice(&mut self, message: &str);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Display)]
pub enum PermissionStatus {
    Granted,
    // a request is in flight, the caller has to wait for the callback
    Requested,
}

pub struct PermissionGate {
    provider: Box<dyn PermissionProvider>,
    notifier: Box<dyn Notifier>,
    request_in_flight: bool,
}

impl PermissionGate {
    pub fn new(provider: Box<dyn PermissionProvider>, notifier: Box<dyn Notifier>) -> Self {
        PermissionGate {
            provider,
            notifier,
            request_in_flight: false,
        }
    }

    pub fn check_or_request(&mut self) -> PermissionStatus {
        if self.provider.is_granted() {
            return PermissionStatus::Granted;
        }
        if !self.request_in_flight {
            debug!("[permission] requesting location permission");
            self.request_in_flight = true;
            self.provider.request();
        }
        PermissionStatus::Requested
    }

    // Returns whether access was granted. Every denial shows the notice.
    pub fn on_result(&mut self, granted: bool) -> bool {
        self.request_in_flight = false;
        if granted {
            info!("[permission] location permission granted");
        } else {
            warn!("[permission] location permission denied");
            self.notifier.show_notice(PERMISSION_NOTICE);
        }
        granted
    }
}
