//! Session-scoped state: the signed-in user, the in-memory user directory,
//! and the live-image rotation counter. One `Session` is created at startup
//! and dropped at exit; nothing here survives the process.

use std::collections::HashMap;

/// Rotating header images for the dashboard.
const WEATHER_IMAGES: [&str; 4] = [
    "https://images.unsplash.com/photo-1504608524841-42fe6f032b4b",
    "https://images.unsplash.com/photo-1500530855697-b586d89ba3ee",
    "https://images.unsplash.com/photo-1501630834273-4b5604d2ee31",
    "https://images.unsplash.com/photo-1500674425229-f692875b0ab7",
];

/// A registered account. Credentials live in memory for the process
/// lifetime only; hashing is out of scope for this tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Username → account map, seeded with the built-in demo account.
/// Keys are case-sensitive and unique; accounts are never deleted.
#[derive(Debug)]
pub struct UserDirectory {
    users: HashMap<String, UserAccount>,
}

impl UserDirectory {
    pub fn with_builtin() -> UserDirectory {
        let mut users = HashMap::new();
        users.insert(
            "subhadip".to_string(),
            UserAccount {
                username: "subhadip".to_string(),
                email: "subhadip@gmail.com".to_string(),
                password: "subhadip123".to_string(),
            },
        );
        UserDirectory { users }
    }

    pub fn get(&self, username: &str) -> Option<&UserAccount> {
        self.users.get(username)
    }

    pub fn contains(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    /// Exact string match on both fields.
    pub fn validate_credentials(&self, username: &str, password: &str) -> bool {
        match self.users.get(username) {
            Some(account) => account.password == password,
            None => false,
        }
    }

    pub fn insert(&mut self, account: UserAccount) {
        self.users.insert(account.username.clone(), account);
    }
}

/// Auto-refresh periods offered by the dashboard timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshInterval {
    #[default]
    Secs15,
    Secs30,
    Min1,
}

impl RefreshInterval {
    pub const ALL: [RefreshInterval; 3] = [
        RefreshInterval::Secs15,
        RefreshInterval::Secs30,
        RefreshInterval::Min1,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RefreshInterval::Secs15 => "15 seconds",
            RefreshInterval::Secs30 => "30 seconds",
            RefreshInterval::Min1 => "1 minute",
        }
    }

    pub fn millis(self) -> u64 {
        match self {
            RefreshInterval::Secs15 => 15_000,
            RefreshInterval::Secs30 => 30_000,
            RefreshInterval::Min1 => 60_000,
        }
    }
}

/// Cooperative auto-rotation trigger. The interval tells the outer clock how
/// often to request a re-render; the counter update itself happens inside
/// the render pass, so no thread or shared state is involved.
#[derive(Debug, Clone, Copy, Default)]
pub struct RotationTimer {
    pub enabled: bool,
    pub interval: RefreshInterval,
}

/// Mutable per-run state threaded through the controller loop.
#[derive(Debug)]
pub struct Session {
    current_user: Option<String>,
    pub users: UserDirectory,
    image_counter: u64,
    pub timer: RotationTimer,
}

impl Session {
    pub fn new() -> Session {
        Session {
            current_user: None,
            users: UserDirectory::with_builtin(),
            image_counter: 0,
            timer: RotationTimer::default(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn current_user(&self) -> Option<&str> {
        self.current_user.as_deref()
    }

    /// Login/logout transition. Either direction restarts the image
    /// rotation from the first slide.
    pub(crate) fn set_current_user(&mut self, username: Option<String>) {
        self.current_user = username;
        self.image_counter = 0;
    }

    pub fn image_counter(&self) -> u64 {
        self.image_counter
    }

    /// One render-cycle update of the live-image rotation: the counter
    /// advances while the timer is enabled and snaps back to zero otherwise.
    pub fn advance_rotation(&mut self) {
        if self.timer.enabled {
            self.image_counter += 1;
        } else {
            self.image_counter = 0;
        }
    }

    pub fn current_image(&self) -> &'static str {
        WEATHER_IMAGES[(self.image_counter % WEATHER_IMAGES.len() as u64) as usize]
    }

    pub fn set_timer(&mut self, enabled: bool, interval: RefreshInterval) {
        self.timer = RotationTimer { enabled, interval };
    }
}

impl Default for Session {
    fn default() -> Session {
        Session::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_starts_with_builtin_account() {
        let dir = UserDirectory::with_builtin();
        assert!(dir.contains("subhadip"));
        assert!(dir.validate_credentials("subhadip", "subhadip123"));
        assert!(!dir.validate_credentials("subhadip", "wrong"));
        assert!(!dir.validate_credentials("Subhadip", "subhadip123"));
    }

    #[test]
    fn rotation_advances_only_while_enabled() {
        let mut session = Session::new();
        session.advance_rotation();
        assert_eq!(session.image_counter(), 0);

        session.set_timer(true, RefreshInterval::Secs30);
        session.advance_rotation();
        session.advance_rotation();
        assert_eq!(session.image_counter(), 2);

        session.set_timer(false, RefreshInterval::Secs30);
        session.advance_rotation();
        assert_eq!(session.image_counter(), 0);
    }

    #[test]
    fn image_selection_wraps_around_the_carousel() {
        let mut session = Session::new();
        session.set_timer(true, RefreshInterval::Secs15);
        let first = session.current_image();
        for _ in 0..WEATHER_IMAGES.len() {
            session.advance_rotation();
        }
        assert_eq!(session.current_image(), first);
    }

    #[test]
    fn user_transitions_reset_the_counter() {
        let mut session = Session::new();
        session.set_timer(true, RefreshInterval::Secs15);
        session.advance_rotation();
        assert_eq!(session.image_counter(), 1);

        session.set_current_user(Some("ada".to_string()));
        assert_eq!(session.image_counter(), 0);
        assert!(session.is_authenticated());

        session.advance_rotation();
        session.set_current_user(None);
        assert_eq!(session.image_counter(), 0);
        assert!(!session.is_authenticated());
    }
}
