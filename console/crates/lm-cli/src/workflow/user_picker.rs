use lm_core::{EntityId, LicenseDraft, LicenseType, Roster, User, UserField};

/// Search-and-select over a prefetched user list, used by the license form.
#[derive(Debug, Clone)]
pub struct UserPicker {
    users: Roster<User>,
    query: String,
    show_candidates: bool,
    selected: Option<User>,
}

impl UserPicker {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Roster::from_records(users),
            query: String::new(),
            show_candidates: false,
            selected: None,
        }
    }

    /// Filter candidates by email substring. A blank query hides the
    /// candidate list; the pinned user stays selected either way.
    pub fn set_query(&mut self, query: &str) -> &[User] {
        self.query = query.to_string();
        self.show_candidates = !query.trim().is_empty();
        self.users.search(query, &[UserField::Email]);
        self.candidates()
    }

    pub fn candidates(&self) -> &[User] {
        if self.show_candidates {
            self.users.view()
        } else {
            &[]
        }
    }

    /// Pin a user. Unknown ids leave the picker unchanged.
    pub fn select(&mut self, id: &EntityId) -> Option<&User> {
        let user = self.users.get(id)?.clone();
        self.query = user.email.clone();
        self.show_candidates = false;
        self.selected = Some(user);
        self.selected.as_ref()
    }

    /// Pin the candidate whose email equals the query, or the only candidate
    /// when there is exactly one.
    pub fn select_best_match(&mut self) -> Option<&User> {
        let query = self.query.trim().to_lowercase();
        let candidates = self.candidates();

        let id = candidates
            .iter()
            .find(|user| user.email.to_lowercase() == query)
            .or(match candidates {
                [only] => Some(only),
                _ => None,
            })
            .map(|user| user.id.clone())?;

        self.select(&id)
    }

    pub fn selected(&self) -> Option<&User> {
        self.selected.as_ref()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn reset(&mut self) {
        self.query.clear();
        self.show_candidates = false;
        self.selected = None;
        self.users.search("", &[]);
    }

    /// Form state for the pinned user.
    pub fn draft<'a>(&'a self, license_type: LicenseType, machine_id: &'a str) -> LicenseDraft<'a> {
        LicenseDraft::new(self.selected(), license_type, machine_id)
    }
}
