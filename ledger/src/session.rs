/// Tracks the single authenticated account, if any. There is exactly one
/// session per running process; logging in replaces any prior session.
#[derive(Debug, Default)]
pub struct Session {
    active: Option<u64>,
}

impl Session {
    pub fn new() -> Self {
        Session { active: None }
    }

    pub fn establish(&mut self, account_id: u64) {
        self.active = Some(account_id);
    }

    pub fn clear(&mut self) {
        self.active = None;
    }

    pub fn current(&self) -> Option<u64> {
        self.active
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }
}
