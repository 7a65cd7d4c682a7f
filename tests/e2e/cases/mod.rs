mod escrow;
mod rpc;
mod transfers;
mod wallets;
