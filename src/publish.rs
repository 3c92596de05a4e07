//! Publishing reports to S3 for the static dashboard.

use anyhow::{Context, Result};
use aws_sdk_s3::primitives::ByteStream;
use tracing::info;

use crate::occupancy::OccupancyReport;
use crate::output::{gzip, to_json};

/// Default object key for the published report.
pub const DEFAULT_KEY: &str = "occupancy/report.json";

/// Returns the object key actually used, appending `.gz` when compressing.
pub fn object_key(key: &str, gzip: bool) -> String {
    if gzip && !key.ends_with(".gz") {
        format!("{key}.gz")
    } else {
        key.to_string()
    }
}

/// Uploads a JSON body to an S3 bucket with `application/json` content type.
pub async fn write_json_to_s3(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
    body: Vec<u8>,
    content_encoding: Option<&str>,
) -> Result<()> {
    client
        .put_object()
        .bucket(bucket)
        .key(key)
        .body(ByteStream::from(body))
        .content_type("application/json")
        .set_content_encoding(content_encoding.map(str::to_string))
        .send()
        .await
        .with_context(|| format!("S3 PutObject failed for s3://{bucket}/{key}"))?;

    Ok(())
}

/// Serializes `report` and uploads it, optionally gzip-compressed.
#[tracing::instrument(skip(client, report))]
pub async fn publish_report(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
    report: &OccupancyReport,
    gzip_body: bool,
) -> Result<String> {
    let key = object_key(key, gzip_body);
    let json = to_json(report, false)?;

    let (body, encoding) = if gzip_body {
        (gzip(&json)?, Some("gzip"))
    } else {
        (json, None)
    };

    let size = body.len();
    write_json_to_s3(client, bucket, &key, body, encoding).await?;

    info!(bucket, key = %key, bytes = size, "Report uploaded to S3");
    Ok(key)
}
