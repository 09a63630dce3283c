use super::ISubscriptionRepo;
use crate::repos::shared::inmemory_repo::*;
use skolero_domain::PushSubscription;
use std::sync::Mutex;

pub struct InMemorySubscriptionRepo {
    subscriptions: Mutex<Vec<PushSubscription>>,
}

impl InMemorySubscriptionRepo {
    pub fn new() -> Self {
        Self {
            subscriptions: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ISubscriptionRepo for InMemorySubscriptionRepo {
    async fn insert(&self, subscription: &PushSubscription) -> anyhow::Result<()> {
        insert(subscription, &self.subscriptions);
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Vec<PushSubscription> {
        find_by(&self.subscriptions, |s: &PushSubscription| s.email == email)
    }

    async fn exists(&self, email: &str, endpoint: &str) -> bool {
        !find_by(&self.subscriptions, |s: &PushSubscription| {
            s.email == email && s.endpoint == endpoint
        })
        .is_empty()
    }
}
