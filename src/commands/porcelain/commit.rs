use crate::areas::repository::Repository;

impl Repository {
    pub async fn commit(&self, message: &str) -> anyhow::Result<()> {
        self.make_commit(message, None).await?;

        Ok(())
    }
}
