//! Test: `PackageId` without `#[package_id(debug = ...)]` should fail.

use mrclean::PackageId;

#[derive(PackageId)]
struct SanitizePackage;

fn main() {}
