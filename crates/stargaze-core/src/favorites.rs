// Favorite repositories, kept for the lifetime of the session
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What toggling an already-favorited id does
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleBehavior {
    /// Toggle removes it
    #[default]
    Remove,
    /// Once favorited, always favorited; toggling again leaves the list alone
    Sticky,
}

/// Favorited repository ids in the order they were marked
#[derive(Debug, Clone, Default)]
pub struct FavoritesTracker {
    ids: Vec<u64>,
    behavior: ToggleBehavior,
}

impl FavoritesTracker {
    pub fn new(behavior: ToggleBehavior) -> Self {
        Self {
            ids: Vec::new(),
            behavior,
        }
    }

    /// Flip `id`; returns whether it is a favorite afterwards
    pub fn toggle(&mut self, id: u64) -> bool {
        match self.ids.iter().position(|&fav| fav == id) {
            Some(index) => match self.behavior {
                ToggleBehavior::Remove => {
                    self.ids.remove(index);
                    debug!("Unfavorited {}", id);
                    false
                }
                ToggleBehavior::Sticky => true,
            },
            None => {
                self.ids.push(id);
                debug!("Favorited {}", id);
                true
            }
        }
    }

    pub fn contains(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.ids.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_absent_appends_once() {
        let mut favs = FavoritesTracker::default();
        assert!(favs.toggle(7));
        assert!(favs.toggle(9));

        assert_eq!(favs.len(), 2);
        assert!(favs.contains(7));
        assert_eq!(favs.iter().collect::<Vec<_>>(), vec![7, 9]);
    }

    #[test]
    fn test_toggle_present_removes() {
        let mut favs = FavoritesTracker::new(ToggleBehavior::Remove);
        favs.toggle(1);
        favs.toggle(2);
        favs.toggle(3);

        assert!(!favs.toggle(2));
        assert_eq!(favs.iter().collect::<Vec<_>>(), vec![1, 3]);
        assert!(favs.toggle(2));
        assert_eq!(favs.len(), 3);
    }

    #[test]
    fn test_sticky_toggle_never_shrinks() {
        let mut favs = FavoritesTracker::new(ToggleBehavior::Sticky);
        favs.toggle(1);
        favs.toggle(2);

        assert!(favs.toggle(1));
        assert!(favs.toggle(1));
        assert_eq!(favs.len(), 2);
        assert_eq!(favs.iter().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_behavior_from_toml_value() {
        #[derive(Deserialize)]
        struct Wrapper {
            toggle: ToggleBehavior,
        }

        let w: Wrapper = toml::from_str(r#"toggle = "sticky""#).unwrap();
        assert_eq!(w.toggle, ToggleBehavior::Sticky);
    }
}
