/*!
 * Request extractors for v0 handlers
 *
 * Public API:
 * - CurrentIdentity
 */

mod current_identity;

pub use current_identity::CurrentIdentity;
