pub mod address;
pub mod amount;
pub mod capture;
pub mod channel;
pub mod ws;

pub use address::{Address, AddressParseError};
pub use amount::{AmountParseError, WeiAmount};
pub use capture::{BotResponse, CaptureResponse, StatsResponse};
pub use channel::{
    ChannelStatsResponse, EpochSettlementResponse, OpenSessionRequest, PendingBalanceResponse,
    RecordTaxRequest, SessionResponse, SettlementLine, SettlementResponse, TaxPaymentResponse,
};
pub use ws::WsServerMessage;
