use std::collections::HashSet;

use crate::domain::{UserId, UserRecord};

/// Result of a follow-back reconciliation: the followees the followers list
/// does not contain, plus the input and output sizes.
#[derive(Clone, Debug, PartialEq)]
pub struct Reconciliation {
    pub not_following_back: Vec<UserRecord>,
    pub followers: usize,
    pub followees: usize,
    pub gap: usize,
}

/// Compute the followees whose id does not appear in `followers`.
///
/// Membership is tested against a hash set of follower ids, so this runs in
/// time linear in `|followers| + |followees|`. The output preserves the
/// original order of `followees`, and duplicate ids in `followees` are not
/// deduplicated; each unmatched duplicate appears independently.
pub fn reconcile(followers: &[UserRecord], followees: &[UserRecord]) -> Reconciliation {
    let known: HashSet<UserId> = followers.iter().map(|u| u.id).collect();

    let not_following_back: Vec<UserRecord> = followees
        .iter()
        .filter(|u| !known.contains(&u.id))
        .cloned()
        .collect();

    Reconciliation {
        followers: followers.len(),
        followees: followees.len(),
        gap: not_following_back.len(),
        not_following_back,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRecord;

    fn user(id: u64, handle: &str) -> UserRecord {
        UserRecord::new(id, handle)
    }

    #[test]
    fn mutual_follower_is_excluded() {
        let followers = vec![user(1, "a")];
        let followees = vec![user(1, "a"), user(2, "b")];

        let r = reconcile(&followers, &followees);
        assert_eq!(r.not_following_back, vec![user(2, "b")]);
        assert_eq!((r.followers, r.followees, r.gap), (1, 2, 1));
    }

    #[test]
    fn empty_followers_yields_all_followees() {
        let followees = vec![user(5, "x")];
        let r = reconcile(&[], &followees);
        assert_eq!(r.not_following_back, followees);
    }

    #[test]
    fn empty_followees_yields_empty_result() {
        let followers = vec![user(1, "a")];
        let r = reconcile(&followers, &[]);
        assert!(r.not_following_back.is_empty());
        assert_eq!((r.followers, r.followees, r.gap), (1, 0, 0));
    }

    #[test]
    fn both_empty() {
        let r = reconcile(&[], &[]);
        assert!(r.not_following_back.is_empty());
        assert_eq!((r.followers, r.followees, r.gap), (0, 0, 0));
    }

    #[test]
    fn duplicate_followee_ids_are_preserved() {
        let followees = vec![user(1, "a"), user(1, "a")];
        let r = reconcile(&[], &followees);
        assert_eq!(r.not_following_back.len(), 2);
    }

    #[test]
    fn preserves_followee_order() {
        let followers = vec![user(2, "b"), user(4, "d")];
        let followees = vec![
            user(5, "e"),
            user(2, "b"),
            user(3, "c"),
            user(4, "d"),
            user(1, "a"),
        ];

        let r = reconcile(&followers, &followees);
        assert_eq!(
            r.not_following_back,
            vec![user(5, "e"), user(3, "c"), user(1, "a")]
        );
    }

    #[test]
    fn result_partitions_followees_by_follower_membership() {
        let followers: Vec<_> = (0..100).filter(|i| i % 3 == 0).map(|i| user(i, "f")).collect();
        let followees: Vec<_> = (0..100).map(|i| user(i, "g")).collect();

        let r = reconcile(&followers, &followees);
        let known: std::collections::HashSet<_> = followers.iter().map(|u| u.id).collect();

        for rec in &r.not_following_back {
            assert!(!known.contains(&rec.id));
        }
        let gap_ids: std::collections::HashSet<_> =
            r.not_following_back.iter().map(|u| u.id).collect();
        for rec in followees.iter().filter(|u| !gap_ids.contains(&u.id)) {
            assert!(known.contains(&rec.id));
        }
    }

    #[test]
    fn is_a_pure_function() {
        let followers = vec![user(1, "a"), user(2, "b")];
        let followees = vec![user(2, "b"), user(3, "c")];

        let first = reconcile(&followers, &followees);
        let second = reconcile(&followers, &followees);
        assert_eq!(first, second);
    }
}
