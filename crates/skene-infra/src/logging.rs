// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Logging bootstrap for tools and tests.
//!
//! The library crates only ever talk to the `log` facade; binding it to
//! `env_logger` is an application concern, centralized here so every tool
//! and test harness configures it the same way. Verbosity is controlled
//! through the standard `RUST_LOG` environment variable.

/// Initializes `env_logger` for a tool or headless run. Safe to call more
/// than once; later calls are ignored.
pub fn init_logging() {
    let _ = env_logger::builder().format_timestamp_millis().try_init();
}

/// Initializes `env_logger` for a test, keeping output capture working.
/// Safe to call from every test; later calls are ignored.
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
