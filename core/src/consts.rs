/*
 * SPDX-FileCopyrightText: 2025 WellAtlas Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::{DateTime, NaiveDateTime};
use std::ops::RangeInclusive;
use std::sync::LazyLock;

pub const PORT_RANGE: RangeInclusive<usize> = 1..=65535;

pub static NULL_TIME: LazyLock<NaiveDateTime> =
    LazyLock::new(|| DateTime::from_timestamp(0, 0).unwrap().naive_utc());

pub const DATABASE_FILE_NAME: &str = "wellatlas.db";
pub const UPLOAD_DIR_NAME: &str = "uploads";

pub const ALLOWED_UPLOAD_EXTENSIONS: [&str; 7] =
    ["png", "jpg", "jpeg", "gif", "pdf", "mp4", "mov"];

pub const SHARE_TOKEN_LENGTH: usize = 48;
pub const API_KEY_PREFIX: &str = "WELL";
