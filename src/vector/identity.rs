//! The identity of a Vector instance.

use super::atomic::RelaxedUsize;
use super::root::num::NonZeroUsize;

//  The next identity to hand out.
static NEXT_IDENTITY: RelaxedUsize = RelaxedUsize::new(1);

//  Identity.
//
//  Unique per Vector instance, for the lifetime of the process, barring wrap-around of the counter.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct Identity(NonZeroUsize);

impl Identity {
    //  Creates a never-seen-before identity.
    pub fn fresh() -> Self {
        loop {
            //  0 is only ever seen on wrap-around, skip it.
            if let Some(raw) = NonZeroUsize::new(NEXT_IDENTITY.fetch_increment()) {
                return Self(raw);
            }
        }
    }
}
