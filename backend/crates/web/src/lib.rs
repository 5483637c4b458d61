//! Web Crate - Server-Rendered Page Plumbing
//!
//! Shared by the `auth` and `employee` page handlers:
//! - `flash` - one-shot cookie payloads (banner, old input, field errors)
//! - `error` - the [`WebError`] taxonomy handlers fail with
//! - `translator` - middleware turning failures into flash redirects or
//!   plain-text statuses
//! - `principal` - the authenticated user extractor
//! - `view` - [`Page`] handle and layout/form view models
//! - `extract` - validated forms and path ids
//! - `method_override` - `_method` support for HTML forms

pub mod context;
pub mod error;
pub mod extract;
pub mod flash;
pub mod method_override;
pub mod principal;
pub mod translator;
pub mod view;

pub use context::WebContext;
pub use error::{WebError, WebResult};
pub use extract::{ValidatedForm, parse_id, required};
pub use flash::{AlertKind, FlashPayload, FlashStore};
pub use principal::Principal;
pub use view::{FormState, Layout, Page};
