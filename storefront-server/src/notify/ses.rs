use async_trait::async_trait;
use aws_sdk_sesv2::Client as SesClient;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};
use shared::models::Order;

use super::{Notifier, NotifyError, render_order_confirmation};

/// Order confirmations through AWS SES v2
#[derive(Debug, Clone)]
pub struct SesNotifier {
    client: SesClient,
    from: String,
    store_name: String,
    currency: String,
}

impl SesNotifier {
    pub fn new(client: SesClient, from: String, store_name: String, currency: String) -> Self {
        Self {
            client,
            from,
            store_name,
            currency,
        }
    }

    /// Build the SES client from the default AWS credential chain
    ///
    /// `region` overrides the chain's region for SES only.
    pub async fn from_env(
        from: String,
        region: Option<String>,
        store_name: String,
        currency: String,
    ) -> Self {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = match region {
            Some(region) => {
                let ses_config = aws_config
                    .to_builder()
                    .region(aws_config::Region::new(region))
                    .build();
                SesClient::new(&ses_config)
            }
            None => SesClient::new(&aws_config),
        };
        Self::new(client, from, store_name, currency)
    }
}

#[async_trait]
impl Notifier for SesNotifier {
    async fn send_order_confirmation(&self, to: &str, order: &Order) -> Result<(), NotifyError> {
        let rendered = render_order_confirmation(order, &self.store_name, &self.currency);

        let subject = Content::builder()
            .data(rendered.subject)
            .build()
            .map_err(|e| NotifyError::Build(e.to_string()))?;
        let text = Content::builder()
            .data(rendered.text)
            .build()
            .map_err(|e| NotifyError::Build(e.to_string()))?;

        let body = Body::builder().text(text).build();
        let message = Message::builder().subject(subject).body(body).build();

        self.client
            .send_email()
            .from_email_address(&self.from)
            .destination(Destination::builder().to_addresses(to).build())
            .content(EmailContent::builder().simple(message).build())
            .send()
            .await
            .map_err(|e| NotifyError::Send(e.to_string()))?;

        tracing::info!(to, order_number = order.order_number, "Order confirmation sent");
        Ok(())
    }
}
