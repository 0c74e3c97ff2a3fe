/// Generates the constructor and the id-keyed repository methods of a client:
/// `create_*`, `get_*`, `save_*`, `list_*s` and `scan_*s`.
///
/// Absent records become `MarketError::NotFound`; actor failures become
/// `MarketError::Storage`.
macro_rules! impl_basic_client {
    ($client_name:ident, $entity:ty, $kind:expr, $entity_name_snake:ident) => {
        paste::paste! {
            impl $client_name {
                pub fn new(inner: $crate::actor_framework::ResourceClient<$entity>) -> Self {
                    Self { inner }
                }

                #[tracing::instrument(skip(self, params))]
                pub async fn [<create_ $entity_name_snake>](
                    &self,
                    params: <$entity as $crate::actor_framework::Entity>::CreateParams,
                ) -> Result<$entity, $crate::error::MarketError> {
                    tracing::debug!("Sending request");
                    let created = self.inner.create(params).await?.into_inner();
                    tracing::info!(id = %created.id, "Record created");
                    Ok(created)
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $entity_name_snake>](&self, id: String) -> Result<$entity, $crate::error::MarketError> {
                    tracing::debug!("Sending request");
                    self.inner
                        .get(id.clone())
                        .await?
                        .ok_or_else(|| $crate::error::MarketError::not_found($kind, id))
                }

                #[tracing::instrument(skip(self, item), fields(id = %item.id))]
                pub async fn [<save_ $entity_name_snake>](&self, item: $entity) -> Result<(), $crate::error::MarketError> {
                    tracing::debug!("Sending request");
                    Ok(self.inner.save(item).await?)
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<list_ $entity_name_snake s>](&self) -> Result<Vec<$entity>, $crate::error::MarketError> {
                    tracing::debug!("Sending request");
                    Ok(self.inner.list().await?)
                }

                #[tracing::instrument(skip(self, predicate))]
                pub async fn [<scan_ $entity_name_snake s>](
                    &self,
                    predicate: impl Fn(&$entity) -> bool + Send + Sync + 'static,
                ) -> Result<Vec<$entity>, $crate::error::MarketError> {
                    tracing::debug!("Sending request");
                    Ok(self.inner.scan(predicate).await?)
                }
            }
        }
    };
}
