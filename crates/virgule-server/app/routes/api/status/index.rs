// Route marker for /api/status. Hooks for the key "api/status/index" are
// registered in src/controllers.rs.
