//! Survey Field Schema
//! Names, kinds and display text for the eight fields of the personality survey.

/// How a field is treated by the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Yes/No or label column, summarized as a count table.
    Categorical,
    /// Numeric column, used as an ordinal axis in a cross-tab.
    Numeric,
}

/// A known survey field.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Panel title on the dashboard.
    pub title: &'static str,
    /// Axis description including the expected range.
    pub description: &'static str,
}

pub const TIME_SPENT_ALONE: Field = Field {
    name: "time_spent_alone",
    kind: FieldKind::Numeric,
    title: "Time Spent Alone",
    description: "Hours spent alone daily (0–11)",
};

pub const STAGE_FEAR: Field = Field {
    name: "stage_fear",
    kind: FieldKind::Categorical,
    title: "Stage Fear",
    description: "Presence of stage fright (Yes/No)",
};

pub const SOCIAL_EVENT_ATTENDANCE: Field = Field {
    name: "social_event_attendance",
    kind: FieldKind::Numeric,
    title: "Social Events",
    description: "Frequency of social events (0–10)",
};

pub const GOING_OUTSIDE: Field = Field {
    name: "going_outside",
    kind: FieldKind::Numeric,
    title: "Going Outside",
    description: "Frequency of going outside (0–7)",
};

pub const DRAINED_AFTER_SOCIALIZING: Field = Field {
    name: "drained_after_socializing",
    kind: FieldKind::Categorical,
    title: "Drained After Socializing",
    description: "Feeling drained after socializing (Yes/No)",
};

pub const FRIENDS_CIRCLE_SIZE: Field = Field {
    name: "friends_circle_size",
    kind: FieldKind::Numeric,
    title: "Friends Circle",
    description: "Number of close friends (0–15)",
};

pub const POST_FREQUENCY: Field = Field {
    name: "post_frequency",
    kind: FieldKind::Numeric,
    title: "Post Frequency",
    description: "Social media post frequency (0–10)",
};

pub const PERSONALITY: Field = Field {
    name: "personality",
    kind: FieldKind::Categorical,
    title: "Personality",
    description: "Target variable (Extrovert/Introvert)",
};

/// All fields in file order.
pub const ALL_FIELDS: [Field; 8] = [
    TIME_SPENT_ALONE,
    STAGE_FEAR,
    SOCIAL_EVENT_ATTENDANCE,
    GOING_OUTSIDE,
    DRAINED_AFTER_SOCIALIZING,
    FRIENDS_CIRCLE_SIZE,
    POST_FREQUENCY,
    PERSONALITY,
];

/// Fields shown as pie charts, in panel order.
pub const PIE_FIELDS: [Field; 3] = [STAGE_FEAR, DRAINED_AFTER_SOCIALIZING, PERSONALITY];

/// Fields shown as stacked bars, in panel order.
pub const BAR_FIELDS: [Field; 5] = [
    TIME_SPENT_ALONE,
    SOCIAL_EVENT_ATTENDANCE,
    GOING_OUTSIDE,
    FRIENDS_CIRCLE_SIZE,
    POST_FREQUENCY,
];

pub const INTROVERT: &str = "Introvert";
pub const EXTROVERT: &str = "Extrovert";

/// Fixed stacking and legend order of the personality labels.
pub const PERSONALITY_ORDER: [&str; 2] = [INTROVERT, EXTROVERT];

/// Canonical column name: trimmed, lowercase, each inner space becomes `_`.
pub fn normalize_column_name(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_column_name() {
        assert_eq!(normalize_column_name("Time_spent_Alone"), "time_spent_alone");
        assert_eq!(normalize_column_name("  Stage Fear "), "stage_fear");
        assert_eq!(normalize_column_name("\tFriends Circle Size\n"), "friends_circle_size");
        // Every space maps to its own underscore; other inner whitespace is kept.
        assert_eq!(normalize_column_name("Friends  Circle"), "friends__circle");
        assert_eq!(normalize_column_name("Post\tFrequency"), "post\tfrequency");
        assert_eq!(normalize_column_name("personality"), "personality");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for field in ALL_FIELDS {
            assert_eq!(normalize_column_name(field.name), field.name);
        }
    }

    #[test]
    fn test_panel_fields_are_partitioned() {
        assert!(PIE_FIELDS.iter().all(|f| f.kind == FieldKind::Categorical));
        assert!(BAR_FIELDS.iter().all(|f| f.kind == FieldKind::Numeric));
        assert_eq!(PIE_FIELDS.len() + BAR_FIELDS.len(), ALL_FIELDS.len());
    }
}
