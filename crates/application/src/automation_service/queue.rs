use super::*;

impl AutomationService {
    fn event_queue(&self) -> AppResult<&Arc<dyn EventQueue>> {
        self.queue.as_ref().ok_or_else(|| {
            AppError::Conflict("automation event queue is not configured".to_owned())
        })
    }

    /// Claims queued events for one worker.
    pub async fn claim_events_for_worker(
        &self,
        worker_id: &str,
        limit: usize,
        lease_seconds: u32,
    ) -> AppResult<Vec<ClaimedEvent>> {
        let queue = self.event_queue()?;

        if worker_id.trim().is_empty() {
            return Err(AppError::Validation(
                "worker_id must not be empty".to_owned(),
            ));
        }

        if limit == 0 {
            return Err(AppError::Validation(
                "limit must be greater than zero".to_owned(),
            ));
        }

        if lease_seconds == 0 {
            return Err(AppError::Validation(
                "lease_seconds must be greater than zero".to_owned(),
            ));
        }

        queue.claim_events(worker_id, limit, lease_seconds).await
    }

    /// Processes one claimed event and finalizes its queue state.
    pub async fn execute_claimed_event(
        &self,
        worker_id: &str,
        claimed: ClaimedEvent,
    ) -> AppResult<EventSummary> {
        let queue = self.event_queue()?;

        if claimed.lease_token.trim().is_empty() {
            return Err(AppError::Validation(
                "claimed event lease_token must not be empty".to_owned(),
            ));
        }

        match self.process_event(&claimed.envelope).await {
            Ok(summary) => {
                queue
                    .complete_event(
                        claimed.job_id.as_str(),
                        worker_id,
                        claimed.lease_token.as_str(),
                    )
                    .await?;
                Ok(summary)
            }
            Err(error) => {
                let error_message = error.to_string();
                if let Err(mark_error) = queue
                    .fail_event(
                        claimed.job_id.as_str(),
                        worker_id,
                        claimed.lease_token.as_str(),
                        error_message.as_str(),
                    )
                    .await
                {
                    return Err(AppError::Internal(format!(
                        "failed to process claimed event '{}': {error}; marking it failed also \
                         failed: {mark_error}",
                        claimed.job_id
                    )));
                }

                Err(error)
            }
        }
    }
}
