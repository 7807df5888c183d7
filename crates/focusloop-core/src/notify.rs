use crate::events::Event;

/// Anything that renders engine events to the user implements this.
/// Delivery is fire-and-forget: no acknowledgment, no return value.
/// Presentation choices (toast timing, deferring badge toasts so they do
/// not collide with the XP toast) belong to the sink.
pub trait NotificationSink {
    fn deliver(&self, event: &Event);
}
