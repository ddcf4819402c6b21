//! This file defines some functions that checks some pre-conditions
//! E.g., Shape of the index, the distribution, and the discretization.

use crate::{
    TextIndex,
    Discretization,
    DistributionMatrix,
    FeatureId,
    TextBoostError,
    Result,
};
use super::constants::NUMERIC_TOLERANCE;


/// Check whether the index has at least one document and one category.
#[inline(always)]
pub(crate) fn index<I>(index: &I) -> Result<()>
    where I: TextIndex + ?Sized,
{
    if index.n_documents() == 0 {
        return Err(TextBoostError::EmptyIndex("documents"));
    }
    if index.n_categories() == 0 {
        return Err(TextBoostError::EmptyIndex("categories"));
    }
    Ok(())
}


/// Check whether the index, the distribution, and the discretization
/// agree on their shapes.
#[inline(always)]
pub(crate) fn dimensions<I>(
    index: &I,
    dist: &DistributionMatrix,
    discretization: &Discretization,
) -> Result<()>
    where I: TextIndex + ?Sized,
{
    self::index(index)?;

    let pairs = [
        ("category count", index.n_categories(), dist.n_categories()),
        ("document count", index.n_documents(), dist.n_documents()),
        ("feature count", index.n_features(), discretization.n_features()),
    ];
    for (what, expected, got) in pairs {
        if expected != got {
            return Err(TextBoostError::DimensionMismatch {
                what, expected, got,
            });
        }
    }

    debug_assert!(
        dist.weights().iter().all(|&w| w >= 0f64),
        "distribution has a negative weight"
    );
    Ok(())
}


/// Check whether `feature` has bins in `discretization`.
/// On failure, `expected` holds the number of features.
#[inline(always)]
pub(crate) fn feature(discretization: &Discretization, feature: FeatureId)
    -> Result<()>
{
    let n_features = discretization.n_features();
    if feature >= n_features {
        return Err(TextBoostError::DimensionMismatch {
            what: "feature id",
            expected: n_features,
            got: feature,
        });
    }
    Ok(())
}


/// Check whether the distribution sums to `1`.
#[inline(always)]
pub(crate) fn normalized(dist: &DistributionMatrix) {
    let total = dist.total();
    debug_assert!(
        (total - 1f64).abs() < NUMERIC_TOLERANCE.sqrt(),
        "sum(dist[..]) = {total}"
    );
}
