use std::sync::Arc;

use async_channel::{Receiver, bounded};
use tracing::{debug, warn};

use crate::calendar::Calendar;
use crate::types::{Bucket, Ticket};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Classified {
    pub expired: Vec<Ticket>,
    pub due_soon: Vec<Ticket>,
    /// Tickets without a usable due date; they land in neither bucket.
    pub unset: usize,
}

impl Classified {
    #[must_use]
    pub fn bucket(&self, bucket: Bucket) -> &[Ticket] {
        match bucket {
            Bucket::Expired => &self.expired,
            Bucket::DueSoon => &self.due_soon,
        }
    }
}

/// Date-only placement of a single ticket.
#[must_use]
pub fn bucket_of(ticket: &Ticket, calendar: &Calendar) -> Option<Bucket> {
    let due = ticket.due_date?;
    if due < calendar.today {
        Some(Bucket::Expired)
    } else if due < calendar.week_boundary {
        Some(Bucket::DueSoon)
    } else {
        None
    }
}

/// Stable partition of `tickets` in one pass.
#[must_use]
pub fn classify(tickets: &[Ticket], calendar: &Calendar) -> Classified {
    let mut out = Classified::default();
    for ticket in tickets {
        match bucket_of(ticket, calendar) {
            Some(Bucket::Expired) => out.expired.push(ticket.clone()),
            Some(Bucket::DueSoon) => out.due_soon.push(ticket.clone()),
            None if ticket.due_date.is_none() => out.unset += 1,
            None => {}
        }
    }
    out
}

/// Spawn one producer per bucket over the shared ticket list. Each producer
/// forwards its matches in order through its own bounded queue and closes it
/// when done.
///
/// Must be called from within a tokio runtime.
#[must_use]
pub fn fan_out(
    tickets: Arc<[Ticket]>,
    calendar: Calendar,
    capacity: usize,
) -> Vec<(Bucket, Receiver<Ticket>)> {
    Bucket::ALL
        .into_iter()
        .map(|bucket| {
            let (tx, rx) = bounded(capacity.max(1));
            let tickets = Arc::clone(&tickets);
            tokio::spawn(async move {
                for ticket in tickets.iter() {
                    if bucket_of(ticket, &calendar) != Some(bucket) {
                        continue;
                    }
                    if tx.send(ticket.clone()).await.is_err() {
                        warn!(%bucket, "bucket consumer went away");
                        return;
                    }
                }
                tx.close();
                debug!(%bucket, "fanout finished");
            });
            (bucket, rx)
        })
        .collect()
}

/// Concurrent equivalent of [`classify`], draining each queue until closed.
pub async fn classify_concurrent(
    tickets: Arc<[Ticket]>,
    calendar: Calendar,
    capacity: usize,
) -> Classified {
    let unset = tickets.iter().filter(|t| t.due_date.is_none()).count();
    let mut out = Classified {
        unset,
        ..Classified::default()
    };
    for (bucket, rx) in fan_out(tickets, calendar, capacity) {
        let sink = match bucket {
            Bucket::Expired => &mut out.expired,
            Bucket::DueSoon => &mut out.due_soon,
        };
        while let Ok(ticket) = rx.recv().await {
            sink.push(ticket);
        }
    }
    out
}
