// ABOUTME: Ephemeral status notifications for the viewer
// ABOUTME: A message with a tick countdown, cleared once the countdown reaches zero

use crate::utils::truncate_with_ellipsis;
use std::time::Duration;

/// Ticks a notification stays visible.
pub const NOTIFICATION_TICKS: u8 = 3;
/// Delay between countdown ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);
/// Columns kept free to the right of a notification.
pub const NOTIFICATION_MARGIN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub remaining_ticks: u8,
}

impl Notification {
    /// Create a notification truncated to fit a terminal `width` columns wide.
    pub fn new(message: &str, width: u16) -> Self {
        let max = (width as usize).saturating_sub(NOTIFICATION_MARGIN);
        Self {
            message: truncate_with_ellipsis(message, max),
            remaining_ticks: NOTIFICATION_TICKS,
        }
    }

    /// Count down one tick. Returns true once the notification has expired.
    pub fn tick(&mut self) -> bool {
        self.remaining_ticks = self.remaining_ticks.saturating_sub(1);
        self.is_expired()
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_ticks == 0
    }
}
