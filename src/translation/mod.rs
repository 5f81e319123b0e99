/*!
 * Field translation pipeline.
 *
 * - `patterns`: compiled recognizers for URLs, e-mails, numbers and currency
 * - `preservation`: placeholder masking and restoration
 * - `case_style`: case detection and re-application
 * - `currency`: currency conversion and symbol substitution
 * - `cache`: in-memory translation cache
 * - `adapter`: provider calls with retry, cache and fallback
 * - `events`: progress and log events
 * - `orchestrator`: per-field pipeline over a row
 */

pub use self::adapter::{Translation, TranslationAdapter, TranslationOrigin};
pub use self::cache::{CacheStats, TranslationCache};
pub use self::case_style::{apply_case, apply_case_masked, detect_case, CasePattern};
pub use self::currency::CurrencyNormalizer;
pub use self::events::{ChannelSink, CollectingSink, EventSink, FnSink, LogSink, NullSink, PipelineEvent};
pub use self::orchestrator::Orchestrator;
pub use self::preservation::{ElementPreserver, PlaceholderCategory, PlaceholderMap, PreservedText};

pub mod adapter;
pub mod cache;
pub mod case_style;
pub mod currency;
pub mod events;
pub mod orchestrator;
pub mod patterns;
pub mod preservation;
