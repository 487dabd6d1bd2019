//! Composite termination conditions.

use super::Termination;
use crate::scope::SearchScope;

/// Combines terminations with OR logic (any may terminate).
///
/// # Example
///
/// ```
/// use draftforge_solver::{NodeCountTermination, OrTermination, TimeTermination};
///
/// let term = OrTermination((TimeTermination::seconds(5), NodeCountTermination::new(10_000)));
/// # let _ = term;
/// ```
#[derive(Debug, Clone)]
pub struct OrTermination<T>(pub T);

macro_rules! impl_or_termination {
    ($($idx:tt: $T:ident),+) => {
        impl<$($T),+> Termination for OrTermination<($($T,)+)>
        where
            $($T: Termination,)+
        {
            fn is_terminated(&self, scope: &SearchScope) -> bool {
                $((self.0).$idx.is_terminated(scope))||+
            }
        }
    };
}

impl_or_termination!(0: T0);
impl_or_termination!(0: T0, 1: T1);
impl_or_termination!(0: T0, 1: T1, 2: T2);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3);
