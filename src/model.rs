use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub name: String,
    pub target_date: NaiveDate,
}

/// Subjects in the order they were added. Positions are the only identity.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    subjects: Vec<Subject>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Index,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PlannerError {
    #[error("enter a subject name")]
    EmptyName,
    #[error("enter valid daily study hours (got {0:?})")]
    InvalidHours(String),
    #[error("add at least one subject")]
    NoSubjects,
    #[error("every subject is due today or already past")]
    NothingUpcoming,
    #[error("a 7-day plan starting {0} runs past the last supported date")]
    DateOutOfRange(NaiveDate),
    #[error("no subject at position {index} ({len} in list)")]
    IndexOutOfRange { index: usize, len: usize },
}

impl PlannerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PlannerError::IndexOutOfRange { .. } => ErrorKind::Index,
            PlannerError::EmptyName
            | PlannerError::InvalidHours(_)
            | PlannerError::NoSubjects
            | PlannerError::NothingUpcoming
            | PlannerError::DateOutOfRange(_) => ErrorKind::Validation,
        }
    }
}

impl Subject {
    pub fn new(name: impl Into<String>, target_date: NaiveDate) -> Self {
        Subject {
            name: name.into(),
            target_date,
        }
    }

    /// Whole days from `today` until the target date; negative once past.
    pub fn days_left(&self, today: NaiveDate) -> i64 {
        (self.target_date - today).num_days()
    }
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    /// Appends a subject and returns the new number of subjects.
    pub fn add(&mut self, name: &str, target_date: NaiveDate) -> Result<usize, PlannerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PlannerError::EmptyName);
        }
        self.subjects.push(Subject::new(name, target_date));
        Ok(self.subjects.len())
    }

    /// Removes the subject at `index`; later subjects shift down by one.
    pub fn remove_at(&mut self, index: usize) -> Result<Subject, PlannerError> {
        if index >= self.subjects.len() {
            return Err(PlannerError::IndexOutOfRange {
                index,
                len: self.subjects.len(),
            });
        }
        Ok(self.subjects.remove(index))
    }

    /// Subjects ordered by target date. Equal dates keep insertion order.
    pub fn list_chronological(&self) -> Vec<&Subject> {
        let mut sorted: Vec<&Subject> = self.subjects.iter().collect();
        sorted.sort_by_key(|s| s.target_date);
        sorted
    }

    pub fn get(&self, index: usize) -> Option<&Subject> {
        self.subjects.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Subject> {
        self.subjects.iter()
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}
