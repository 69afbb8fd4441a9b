// Mirrored controller slot for /users/:user. Hooks for the key
// "users/_user/index" are registered in src/controllers.rs.
