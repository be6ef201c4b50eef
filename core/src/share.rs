/*
 * SPDX-FileCopyrightText: 2025 WellAtlas Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use rand::Rng;
use rand::distr::Alphanumeric;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, TransactionTrait,
};
use uuid::Uuid;

use super::consts::SHARE_TOKEN_LENGTH;
use super::types::*;

/// Access granularity of a share link: the whole site, or only entries
/// created on one calendar day. The two scopes are disjoint; a whole-site
/// token never satisfies a day request and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareScope {
    Site,
    Day(NaiveDate),
}

impl ShareScope {
    pub fn from_date(date: Option<NaiveDate>) -> Self {
        match date {
            Some(date) => ShareScope::Day(date),
            None => ShareScope::Site,
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            ShareScope::Site => None,
            ShareScope::Day(date) => Some(*date),
        }
    }
}

pub fn generate_share_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SHARE_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// The authorization decision for a presented token: the link must be
/// live, bound to the requested site, and scoped exactly as requested.
pub fn link_grants(link: &MShareLink, site_id: Uuid, scope: ShareScope) -> bool {
    !link.revoked && link.site == site_id && link.date == scope.date()
}

/// Returns the live share link for `(site_id, scope)`, minting one on
/// first use. Lookup and insert run in one transaction so concurrent
/// callers for the same scope resolve to a single row. Repeated calls
/// never rotate a live token; after a revocation a fresh token is minted.
pub async fn get_or_create_share(
    db: &DatabaseConnection,
    site_id: Uuid,
    scope: ShareScope,
) -> Result<MShareLink> {
    let link = db
        .transaction::<_, MShareLink, DbErr>(|txn| {
            Box::pin(async move {
                let mut condition = Condition::all()
                    .add(CShareLink::Site.eq(site_id))
                    .add(CShareLink::Revoked.eq(false));

                condition = match scope.date() {
                    Some(date) => condition.add(CShareLink::Date.eq(date)),
                    None => condition.add(CShareLink::Date.is_null()),
                };

                if let Some(existing) = EShareLink::find().filter(condition).one(txn).await? {
                    return Ok(existing);
                }

                let link = AShareLink {
                    id: Set(Uuid::new_v4()),
                    site: Set(site_id),
                    date: Set(scope.date()),
                    token: Set(generate_share_token()),
                    revoked: Set(false),
                    created_at: Set(Utc::now().naive_utc()),
                };

                link.insert(txn).await
            })
        })
        .await
        .context("Failed to get or create share link")?;

    Ok(link)
}

/// Resolves an anonymously presented token against a site and scope.
/// Every failure mode collapses to `None` so a caller cannot probe
/// whether a token exists, is revoked, or is scoped differently.
pub async fn verify_share(
    db: &DatabaseConnection,
    token: &str,
    site_id: Uuid,
    scope: ShareScope,
) -> Result<Option<MShareLink>> {
    let link = EShareLink::find()
        .filter(CShareLink::Token.eq(token))
        .one(db)
        .await
        .context("Failed to query share link")?;

    Ok(link.filter(|l| link_grants(l, site_id, scope)))
}

/// The authorization gate for serving file bytes to anonymous callers.
/// Walks file -> entry -> site and checks the token against that site;
/// a day-scoped link additionally requires the entry to fall on its day.
/// Runs on every request so a revocation takes effect immediately.
pub async fn resolve_file_access(
    db: &DatabaseConnection,
    token: &str,
    file_id: Uuid,
) -> Result<Option<(MEntryFile, MShareLink)>> {
    let Some(file) = EEntryFile::find_by_id(file_id)
        .one(db)
        .await
        .context("Failed to query entry file")?
    else {
        return Ok(None);
    };

    let Some(entry) = EEntry::find_by_id(file.entry)
        .one(db)
        .await
        .context("Failed to query entry")?
    else {
        return Ok(None);
    };

    let Some(link) = EShareLink::find()
        .filter(CShareLink::Token.eq(token))
        .one(db)
        .await
        .context("Failed to query share link")?
    else {
        return Ok(None);
    };

    if link.revoked || link.site != entry.site {
        return Ok(None);
    }

    if let Some(date) = link.date {
        if entry.created_at.date() != date {
            return Ok(None);
        }
    }

    Ok(Some((file, link)))
}

pub async fn revoke_share(db: &DatabaseConnection, link: MShareLink) -> Result<MShareLink> {
    let mut alink: AShareLink = link.into();
    alink.revoked = Set(true);

    Ok(alink
        .update(db)
        .await
        .context("Failed to revoke share link")?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use entity::entry::EntryType;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::collections::HashSet;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_link(site: Uuid, date: Option<NaiveDate>, revoked: bool) -> MShareLink {
        MShareLink {
            id: Uuid::new_v4(),
            site,
            date,
            token: generate_share_token(),
            revoked,
            created_at: Default::default(),
        }
    }

    #[test]
    fn token_shape() {
        let token = generate_share_token();
        assert_eq!(token.len(), SHARE_TOKEN_LENGTH);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn tokens_do_not_repeat() {
        let tokens: HashSet<String> = (0..200).map(|_| generate_share_token()).collect();
        assert_eq!(tokens.len(), 200);
    }

    #[test]
    fn scope_roundtrip() {
        assert_eq!(ShareScope::from_date(None), ShareScope::Site);
        assert_eq!(
            ShareScope::from_date(Some(day(2024, 1, 5))),
            ShareScope::Day(day(2024, 1, 5))
        );
        assert_eq!(ShareScope::Site.date(), None);
        assert_eq!(ShareScope::Day(day(2024, 1, 5)).date(), Some(day(2024, 1, 5)));
    }

    #[test]
    fn grant_requires_exact_scope() {
        let site = Uuid::new_v4();
        let other_site = Uuid::new_v4();

        let whole_site = sample_link(site, None, false);
        assert!(link_grants(&whole_site, site, ShareScope::Site));
        assert!(!link_grants(&whole_site, site, ShareScope::Day(day(2024, 1, 5))));
        assert!(!link_grants(&whole_site, other_site, ShareScope::Site));

        let day_link = sample_link(site, Some(day(2024, 1, 5)), false);
        assert!(link_grants(&day_link, site, ShareScope::Day(day(2024, 1, 5))));
        assert!(!link_grants(&day_link, site, ShareScope::Day(day(2024, 1, 6))));
        assert!(!link_grants(&day_link, site, ShareScope::Site));
        assert!(!link_grants(&day_link, other_site, ShareScope::Day(day(2024, 1, 5))));
    }

    #[test]
    fn grant_denies_revoked() {
        let site = Uuid::new_v4();
        let revoked = sample_link(site, None, true);
        assert!(!link_grants(&revoked, site, ShareScope::Site));

        let revoked_day = sample_link(site, Some(day(2024, 1, 5)), true);
        assert!(!link_grants(&revoked_day, site, ShareScope::Day(day(2024, 1, 5))));
    }

    #[tokio::test]
    async fn verify_rejects_scope_mismatch_even_when_token_matches() {
        let site = Uuid::new_v4();
        let link = sample_link(site, Some(day(2024, 1, 5)), false);
        let token = link.token.clone();

        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([vec![link.clone()]])
            .append_query_results([vec![link.clone()]])
            .into_connection();

        // the query finds the row, the scope guard must still reject it
        assert_eq!(
            verify_share(&db, &token, site, ShareScope::Site).await.unwrap(),
            None
        );
        assert_eq!(
            verify_share(&db, &token, site, ShareScope::Day(day(2024, 1, 5)))
                .await
                .unwrap(),
            Some(link)
        );
    }

    #[tokio::test]
    async fn verify_handles_unknown_token() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([Vec::<MShareLink>::new()])
            .into_connection();

        assert_eq!(
            verify_share(&db, "nosuchtoken", Uuid::new_v4(), ShareScope::Site)
                .await
                .unwrap(),
            None
        );
    }

    fn sample_entry(site: Uuid, created: chrono::NaiveDateTime) -> MEntry {
        MEntry {
            id: Uuid::new_v4(),
            site,
            entry_type: EntryType::General,
            note: String::new(),
            created_by: Uuid::new_v4(),
            created_at: created,
        }
    }

    fn sample_file(entry: Uuid) -> MEntryFile {
        MEntryFile {
            id: Uuid::new_v4(),
            entry,
            filename: "20240105093000000000_pump.pdf".to_string(),
            original_name: "pump.pdf".to_string(),
            mime: "application/pdf".to_string(),
            comment: String::new(),
            created_at: Default::default(),
        }
    }

    #[tokio::test]
    async fn file_access_denied_when_entry_outside_day_scope() {
        let site = Uuid::new_v4();
        let entry = sample_entry(site, day(2024, 1, 5).and_hms_opt(10, 0, 0).unwrap());
        let file = sample_file(entry.id);
        let link = sample_link(site, Some(day(2024, 1, 6)), false);
        let token = link.token.clone();

        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([vec![file.clone()]])
            .append_query_results([vec![entry.clone()]])
            .append_query_results([vec![link.clone()]])
            .into_connection();

        assert!(
            resolve_file_access(&db, &token, file.id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn file_access_granted_within_day_scope() {
        let site = Uuid::new_v4();
        let entry = sample_entry(site, day(2024, 1, 5).and_hms_opt(10, 0, 0).unwrap());
        let file = sample_file(entry.id);
        let link = sample_link(site, Some(day(2024, 1, 5)), false);
        let token = link.token.clone();

        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([vec![file.clone()]])
            .append_query_results([vec![entry.clone()]])
            .append_query_results([vec![link.clone()]])
            .into_connection();

        let granted = resolve_file_access(&db, &token, file.id).await.unwrap();
        assert_eq!(granted, Some((file, link)));
    }

    #[tokio::test]
    async fn file_access_denied_for_foreign_site_token() {
        let entry = sample_entry(Uuid::new_v4(), day(2024, 1, 5).and_hms_opt(10, 0, 0).unwrap());
        let file = sample_file(entry.id);
        let link = sample_link(Uuid::new_v4(), None, false);
        let token = link.token.clone();

        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([vec![file.clone()]])
            .append_query_results([vec![entry.clone()]])
            .append_query_results([vec![link.clone()]])
            .into_connection();

        assert!(
            resolve_file_access(&db, &token, file.id)
                .await
                .unwrap()
                .is_none()
        );
    }
}
