//! Small declarative helpers shared by the web crates.

#[cfg(feature = "actix")]
#[doc(hidden)]
pub use actix_web as __actix_web;

/// Declares a `pub fn routes(cfg: &mut ServiceConfig)` for the current module.
///
/// Each entry is either `route <service>,` for a handler declared with one of
/// the actix-web routing attributes, or `mod <module>,` for a child module
/// that declares its own `routes` function.
///
/// ```ignore
/// macros_utils::routes! {
///     route index,
///     mod status,
/// }
/// ```
#[cfg(feature = "actix")]
#[macro_export]
macro_rules! routes {
    (@entries $cfg:ident;) => {};
    (@entries $cfg:ident; route $service:ident, $($rest:tt)*) => {
        $cfg.service($service);
        $crate::routes!(@entries $cfg; $($rest)*);
    };
    (@entries $cfg:ident; mod $module:ident, $($rest:tt)*) => {
        $module::routes($cfg);
        $crate::routes!(@entries $cfg; $($rest)*);
    };
    ($($entries:tt)*) => {
        pub fn routes(cfg: &mut $crate::__actix_web::web::ServiceConfig) {
            $crate::routes!(@entries cfg; $($entries)*);
        }
    };
}
