//! Compiled invocation thunks

/// A compiled, directly-callable function bound to one instance member
/// signature of declaring type `T`.
///
/// Getters take `A = ()`, setters `A = (V,)` with `R = ()`; methods take
/// their full argument tuple. All instance access goes through `&mut T`.
pub struct InstanceThunk<T, A, R> {
    body: Box<dyn Fn(&mut T, A) -> R + Send + Sync>,
}

impl<T, A, R> InstanceThunk<T, A, R> {
    pub(crate) fn new(body: Box<dyn Fn(&mut T, A) -> R + Send + Sync>) -> Self {
        Self { body }
    }

    /// Invoke the compiled thunk.
    pub fn call(&self, target: &mut T, args: A) -> R {
        (self.body)(target, args)
    }
}

impl<T, A, R> std::fmt::Debug for InstanceThunk<T, A, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstanceThunk").finish_non_exhaustive()
    }
}

/// A compiled, directly-callable function bound to one static member or
/// constructor signature.
pub struct StaticThunk<A, R> {
    body: Box<dyn Fn(A) -> R + Send + Sync>,
}

impl<A, R> StaticThunk<A, R> {
    pub(crate) fn new(body: Box<dyn Fn(A) -> R + Send + Sync>) -> Self {
        Self { body }
    }

    /// Invoke the compiled thunk.
    pub fn call(&self, args: A) -> R {
        (self.body)(args)
    }
}
