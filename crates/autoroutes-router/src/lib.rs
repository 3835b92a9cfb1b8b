//! # Autoroutes Router
//!
//! Translates file-system route keys into URL patterns, following the
//! Next.js bracket convention:
//! - Static segments (`/about`)
//! - Dynamic segments (`[id]` → `/users/:id`)
//! - Catch-all segments (`[...slug]` → `/docs/*slug`)
//! - Optional catch-all segments (`[[...slug]]` → `/docs/*slug`, also matching `/docs`)
//! - Index routes (`posts/index` → `/posts`)
//!
//! ## Functional Approach
//!
//! - Segment classification is a pure function over `&str`
//! - Translation is a single `try_fold` over the key's segments
//! - Path normalization returns `Cow::Borrowed` for already-canonical paths
//!
//! The parameter prefixes are configurable through [`Syntax`] so the same key
//! can target routers with different placeholder conventions.
//!
//! ## Example
//!
//! ```
//! use autoroutes_router::{translate, ParamKind};
//!
//! let pattern = translate("/posts/[id]/index").unwrap();
//! assert_eq!(pattern.path(), "/posts/:id");
//! assert_eq!(pattern.params()[0].name, "id");
//! assert_eq!(pattern.params()[0].kind, ParamKind::Dynamic);
//!
//! let params = pattern.matches("/posts/42").unwrap();
//! assert_eq!(params.get("id"), Some(&"42".to_string()));
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod error;
pub mod path;
pub mod route;

pub use error::{InvalidSegmentError, SegmentErrorKind};
pub use path::{is_valid_path, join_paths, normalize_path};
pub use route::parser::{translate, translate_with, Syntax};
pub use route::pattern::{classify_segment, PatternSegment};
pub use route::{Param, ParamKind, RoutePattern};
