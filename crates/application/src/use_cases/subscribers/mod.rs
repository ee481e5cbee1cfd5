mod subscribe;
mod unsubscribe;

pub use subscribe::SubscribeUseCase;
pub use unsubscribe::UnsubscribeUseCase;
