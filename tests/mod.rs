
// This file organizes the integration tests into a cohesive test suite.
// Each module tests a specific aspect of the library:
// - calendar_tests: date parsing, arithmetic and week/month grids over many dates
// - config_tests: loading configuration and installing the global default
// - navigation_tests: day, week and month view ranges
