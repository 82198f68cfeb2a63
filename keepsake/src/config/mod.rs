//! Compiled-in page anchors.
//!
//! The dates are fixed per deployment, embedded the same way the page embeds
//! them. ISO-8601 with explicit offsets; Riyadh is UTC+3.

/// First message: April 18, 2025, 3:35 AM Riyadh time.
pub const FIRST_MESSAGE_ANCHOR: &str = "2025-04-18T03:35:00+03:00";

/// Officially together: May 8, 2025, 3:31 PM Riyadh time.
pub const OFFICIAL_ANCHOR: &str = "2025-05-08T15:31:00+03:00";

/// Birth dates for the age displays and birthday countdowns.
pub const YOUR_BIRTH_DATE: &str = "2003-05-25";
pub const HER_BIRTH_DATE: &str = "2002-11-14";

/// Widget identifiers, matching the page's element ids.
pub mod widget_ids {
    pub const TIMER_FIRST_MESSAGE: &str = "timer-first-message";
    pub const TIMER_OFFICIAL: &str = "timer-official";
    pub const YOUR_AGE: &str = "your-age";
    pub const YOUR_BIRTHDAY_COUNTDOWN: &str = "your-birthday-countdown";
    pub const HER_AGE: &str = "her-age";
    pub const HER_BIRTHDAY_COUNTDOWN: &str = "her-birthday-countdown";
}
