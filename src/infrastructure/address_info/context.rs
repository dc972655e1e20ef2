//! Facts derived from the transaction being described

use crate::domain::address_info::{
    AddressInfo, AddressInfoSource, ContextInfo, ContextKind, FetchContext,
};

/// Marks the transaction sender
#[derive(Debug, Default, Clone, Copy)]
pub struct ContextSource;

#[async_trait::async_trait]
impl AddressInfoSource for ContextSource {
    async fn fetch_info(&self, address: &str, context: &FetchContext) -> Vec<AddressInfo> {
        if address == context.tx.from {
            vec![AddressInfo::Context(ContextInfo {
                context: ContextKind::MsgSender,
            })]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::U256;

    use super::*;
    use crate::domain::Transaction;

    #[tokio::test]
    async fn only_the_sender_is_tagged() {
        let ctx = FetchContext::new(Transaction::new("0xaa", "0xbb", "0x", U256::ZERO));

        let info = ContextSource.fetch_info("0xaa", &ctx).await;
        assert_eq!(
            info,
            vec![AddressInfo::Context(ContextInfo {
                context: ContextKind::MsgSender
            })]
        );
        assert!(ContextSource.fetch_info("0xbb", &ctx).await.is_empty());
        assert!(ContextSource.fetch_info("0xAA", &ctx).await.is_empty());
    }
}
