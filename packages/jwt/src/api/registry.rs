//! Process-wide signing-method registry.
//!
//! Maps an `alg` header value to a constructor for its [`SigningMethod`].
//! Readers load an immutable snapshot; registration swaps in a new one, so
//! lookups never block behind a writer.

use crate::api::algorithms::{
    ES256, ES384, ES512, HS256, HS384, HS512, PS256, PS384, PS512, RS256, RS384, RS512,
};
use crate::traits::SigningMethod;
use arc_swap::ArcSwap;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;

/// Produces the signing method for one `alg` value.
pub type MethodConstructor = Arc<dyn Fn() -> Arc<dyn SigningMethod> + Send + Sync>;

type Snapshot = HashMap<String, MethodConstructor>;

fn constant<M: SigningMethod + Copy + 'static>(method: M) -> MethodConstructor {
    Arc::new(move || Arc::new(method) as Arc<dyn SigningMethod>)
}

static REGISTRY: Lazy<ArcSwap<Snapshot>> = Lazy::new(|| {
    let builtin = [
        constant(HS256),
        constant(HS384),
        constant(HS512),
        constant(RS256),
        constant(RS384),
        constant(RS512),
        constant(PS256),
        constant(PS384),
        constant(PS512),
        constant(ES256),
        constant(ES384),
        constant(ES512),
    ];
    let snapshot = builtin
        .into_iter()
        .map(|ctor| (ctor().alg().to_string(), ctor))
        .collect();
    ArcSwap::from_pointee(snapshot)
});

/// Register (or replace) the constructor for `alg`.
///
/// The last registration for a name wins. Safe to call concurrently with
/// lookups.
pub fn register_signing_method<F>(alg: impl Into<String>, ctor: F)
where
    F: Fn() -> Arc<dyn SigningMethod> + Send + Sync + 'static,
{
    let alg = alg.into();
    let ctor: MethodConstructor = Arc::new(ctor);
    REGISTRY.rcu(|current| {
        let mut next = Snapshot::clone(current);
        next.insert(alg.clone(), Arc::clone(&ctor));
        next
    });
    tracing::trace!(alg = %alg, "registered signing method");
}

/// Look up the signing method registered for `alg`.
#[must_use]
pub fn get_signing_method(alg: &str) -> Option<Arc<dyn SigningMethod>> {
    REGISTRY.load().get(alg).map(|ctor| ctor())
}

/// Names currently registered, sorted.
#[must_use]
pub fn registered_algorithms() -> Vec<String> {
    let mut names: Vec<String> = REGISTRY.load().keys().cloned().collect();
    names.sort_unstable();
    names
}
