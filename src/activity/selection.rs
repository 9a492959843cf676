//! Random recipient selection for the mail step.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::graph::User;

/// Pick recipients for `sender` among all other users.
///
/// The target count is drawn uniformly from `min..=max` and then clamped to
/// the number of other users; recipients are distinct. The sender is never
/// picked, matched by principal name. Returns an empty list when the sender
/// is alone in the tenant.
pub fn select_recipients<'a, R: Rng + ?Sized>(
    users: &'a [User],
    sender: &User,
    min: usize,
    max: usize,
    rng: &mut R,
) -> Vec<&'a str> {
    let others: Vec<&'a str> = users
        .iter()
        .filter(|u| u.user_principal_name != sender.user_principal_name)
        .map(|u| u.user_principal_name.as_str())
        .collect();

    if others.is_empty() {
        return Vec::new();
    }

    let wanted = rng.gen_range(min..=max.max(min));
    let count = wanted.min(others.len());

    others.choose_multiple(rng, count).copied().collect()
}
