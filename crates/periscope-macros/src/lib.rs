//! periscope-macros: marker attribute for Periscope accessor generation
//!
//! Provides `#[privates_available(Type)]`, the declaration that a test item
//! wants accessors for the hidden members of `Type`. The attribute is inert:
//! it validates its argument and emits the item unchanged. The generation
//! pipeline discovers the markers by scanning source, so the attribute's
//! only compile-time job is to exist and to reject malformed arguments
//! early.

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Item, Path};

/// Marks a test item to make the hidden members of the given type
/// accessible through generated accessors.
///
/// Attachable to functions, structs, impls, and modules. Repeat the
/// attribute to mark several targets. Not inherited by nested items.
///
/// # Example
///
/// ```ignore
/// use periscope_macros::privates_available;
///
/// #[privates_available(crate::widgets::Widget)]
/// #[privates_available(crate::widgets::Registry)]
/// mod widget_tests {
///     // generated Widget_Privates / Widget_Privates_Static are in scope
///     // wherever the emitted artifact was included
/// }
/// ```
#[proc_macro_attribute]
pub fn privates_available(attr: TokenStream, item: TokenStream) -> TokenStream {
    // One type path per attribute occurrence.
    let _target = parse_macro_input!(attr as Path);
    let item = parse_macro_input!(item as Item);
    quote! { #item }.into()
}
