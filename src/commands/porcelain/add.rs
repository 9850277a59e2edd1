use crate::areas::repository::Repository;

impl Repository {
    pub async fn add(&self, name: &str) -> anyhow::Result<()> {
        let (_, head) = self.head_commit()?;

        let staging = self.staging();
        let mut staging = staging.lock().await;
        staging.stage_add(self.workspace(), name, &head)
    }

    pub async fn rm(&self, name: &str) -> anyhow::Result<()> {
        let (_, head) = self.head_commit()?;

        let staging = self.staging();
        let mut staging = staging.lock().await;
        staging.stage_remove(self.workspace(), name, &head)
    }
}
