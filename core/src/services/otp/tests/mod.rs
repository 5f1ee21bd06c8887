//! Tests for the OTP service


mod service_tests;
