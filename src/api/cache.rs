//! Query Cache
//!
//! Last successful result of each cached query, keyed by tag.
//! Mutations invalidate the tags they affect so the next read refetches.
//! Each tag carries a generation; a result fetched before an invalidation
//! is not stored after it.

use crate::models::{Task, User};

/// Label of a cached query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheTag {
    Tasks,
    User,
}

#[derive(Debug, Default)]
pub struct QueryCache {
    tasks: Option<Vec<Task>>,
    user: Option<User>,
    tasks_generation: u64,
    user_generation: u64,
}

impl QueryCache {
    pub fn tasks(&self) -> Option<&[Task]> {
        self.tasks.as_deref()
    }

    /// Store a task list fetched at `generation`; stale results are dropped
    pub fn store_tasks(&mut self, tasks: Vec<Task>, generation: u64) -> bool {
        if generation != self.tasks_generation {
            return false;
        }
        self.tasks = Some(tasks);
        true
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Store a profile fetched at `generation`; stale results are dropped
    pub fn store_user(&mut self, user: User, generation: u64) -> bool {
        if generation != self.user_generation {
            return false;
        }
        self.user = Some(user);
        true
    }

    /// Current generation of `tag`; read it before sending the request
    pub fn generation(&self, tag: CacheTag) -> u64 {
        match tag {
            CacheTag::Tasks => self.tasks_generation,
            CacheTag::User => self.user_generation,
        }
    }

    pub fn invalidate(&mut self, tag: CacheTag) {
        match tag {
            CacheTag::Tasks => {
                self.tasks = None;
                self.tasks_generation += 1;
            }
            CacheTag::User => {
                self.user = None;
                self.user_generation += 1;
            }
        }
    }

    pub fn clear(&mut self) {
        self.invalidate(CacheTag::Tasks);
        self.invalidate(CacheTag::User);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus;

    fn task(id: &str) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {}", id),
            description: None,
            status: TaskStatus::Pending,
        }
    }

    fn user() -> User {
        User {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            is_verified: true,
        }
    }

    #[test]
    fn test_invalidate_only_touches_its_tag() {
        let mut cache = QueryCache::default();
        cache.store_tasks(vec![task("1")], 0);
        cache.store_user(user(), 0);

        cache.invalidate(CacheTag::Tasks);

        assert!(cache.tasks().is_none());
        assert_eq!(cache.user(), Some(&user()));
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut cache = QueryCache::default();
        cache.store_tasks(vec![task("1"), task("2")], 0);
        cache.store_user(user(), 0);

        cache.clear();

        assert!(cache.tasks().is_none());
        assert!(cache.user().is_none());
    }

    #[test]
    fn test_list_started_before_invalidation_is_not_stored() {
        let mut cache = QueryCache::default();
        let started_at = cache.generation(CacheTag::Tasks);

        cache.invalidate(CacheTag::Tasks);

        assert!(!cache.store_tasks(vec![task("stale")], started_at));
        assert!(cache.tasks().is_none());

        let restarted_at = cache.generation(CacheTag::Tasks);
        assert!(cache.store_tasks(vec![task("fresh")], restarted_at));
        assert_eq!(cache.tasks().map(|t| t[0].id.as_str()), Some("fresh"));
    }

    #[test]
    fn test_clear_also_outdates_pending_profile_fetch() {
        let mut cache = QueryCache::default();
        let started_at = cache.generation(CacheTag::User);

        cache.clear();

        assert!(!cache.store_user(user(), started_at));
        assert!(cache.user().is_none());
    }
}
