use crate::jwt::Claims;

/// Decides whether a verified identity may use a gated operation.
///
/// Role and permission logic plugs in here. Any `Fn(&Claims) -> bool` is a
/// policy.
pub trait AccessPolicy: Send + Sync + 'static {
    fn permits(&self, claims: &Claims) -> bool;
}

impl<F> AccessPolicy for F
where
    F: Fn(&Claims) -> bool + Send + Sync + 'static,
{
    fn permits(&self, claims: &Claims) -> bool {
        self(claims)
    }
}

/// Admits every authenticated identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyAuthenticated;

impl AccessPolicy for AnyAuthenticated {
    fn permits(&self, _claims: &Claims) -> bool {
        true
    }
}
