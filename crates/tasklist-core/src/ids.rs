//! ID prefix constants.
//!
//! IDs are generated by the database layer as `{prefix}-{8 hex chars}`,
//! e.g. `tsk-a3f8b2c1`.

/// Prefix for task IDs.
pub const PREFIX_TASK: &str = "tsk";

/// Every prefix in use, for exhaustive ID-format tests.
pub const ALL_PREFIXES: &[&str] = &[PREFIX_TASK];

/// Check whether `id` has the shape `{prefix}-{8 lowercase hex chars}`.
#[must_use]
pub fn has_prefix_format(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|hex| {
            hex.len() == 8
                && hex
                    .chars()
                    .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_task_id() {
        assert!(has_prefix_format("tsk-a3f8b2c1", PREFIX_TASK));
    }

    #[test]
    fn rejects_wrong_prefix_or_length() {
        assert!(!has_prefix_format("fnd-a3f8b2c1", PREFIX_TASK));
        assert!(!has_prefix_format("tsk-a3f8b2", PREFIX_TASK));
        assert!(!has_prefix_format("tsk-A3F8B2C1", PREFIX_TASK));
        assert!(!has_prefix_format("tska3f8b2c1", PREFIX_TASK));
    }
}
