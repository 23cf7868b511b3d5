pub mod societal;
