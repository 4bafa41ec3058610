//! DTOs module - Data Transfer Objects
//!
//! Questo modulo contiene tutti i DTOs usati per la comunicazione client-server.
//! I DTOs separano la rappresentazione esterna (API) dalla rappresentazione interna (entities).

pub mod account;
pub mod admin;
pub mod message;
pub mod request;
pub mod session;
pub mod story;
pub mod user;

// Re-exports per facilitare l'import
pub use account::{EarnResponseDTO, NetworkStateDTO, PremiumStatusDTO, UnlockTaskResponseDTO};
pub use admin::{ChangePasswordDTO, RemovePasswordDTO};
pub use message::{SendMessageDTO, SendMessageResponseDTO};
pub use request::{
    ChannelRequestDTO, ChannelRequestResponseDTO, EnrichedRequestDTO, FriendRequestDTO,
    RelativeAge, ResolutionDTO,
};
pub use session::{InitialDataDTO, SessionDTO, SessionRequestDTO};
pub use story::PostStoryDTO;
pub use user::{
    CreateUserDTO, CreateUserResponseDTO, ProfileSetupDTO, UpdateProfileDTO, UpdateRoleDTO,
};
