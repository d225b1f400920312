// Service exports
pub mod likes;
pub mod matching;
pub mod sessions;
pub mod supabase;

pub use likes::{LikedPetsStore, LikesError};
pub use matching::{MatchOutcome, MatchingService};
pub use sessions::{Session, SessionState, SessionStore, SharedSession};
pub use supabase::{SupabaseClient, SupabaseError, SupabaseTables};
