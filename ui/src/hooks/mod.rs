pub mod use_price_channel;
