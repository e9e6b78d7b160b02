//! The lazy pairwise array and the read-only container trait it shares
//! with the precomputed variant.

mod array;
mod lazy_array;

pub use array::*;
pub use lazy_array::*;

use crate::cache::*;
use crate::collection::*;
use crate::distances::*;
use crate::error::*;
use crate::extract::*;
use crate::util::indexing::*;
use crate::util::*;
