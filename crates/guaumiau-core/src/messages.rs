// User-facing texts. The app ships in Spanish.

// ── Validation ──
pub const FILL_ALL_FIELDS: &str = "Completa todos los campos";
pub const FILL_REQUIRED_FIELDS: &str = "Completa todos los campos obligatorios";
pub const NAME_BLANK: &str = "El nombre no puede estar vacío";
pub const EMAIL_INVALID: &str = "Formato de correo inválido";
pub const PASSWORD_TOO_SHORT: &str = "La contraseña debe tener al menos 6 caracteres";
pub const PASSWORDS_DIFFER: &str = "Las contraseñas no coinciden";

// ── Outcomes ──
pub const REGISTER_OK: &str = "¡Registro exitoso! Ya puedes iniciar sesión.";
pub const PET_ADDED: &str = "Mascota agregada";
pub const PET_UPDATED: &str = "Mascota actualizada";
pub const PET_DELETED: &str = "Mascota eliminada";

pub fn welcome(name: &str) -> String {
    if name.trim().is_empty() {
        "¡Bienvenido!".to_owned()
    } else {
        format!("¡Bienvenido, {}!", name.trim())
    }
}

// ── Failure fallbacks (suffixed with the HTTP status) ──
pub const REGISTER_FAILED: &str = "Error de registro";
pub const LOGIN_FAILED: &str = "Error de credenciales";
pub const LOAD_PETS_FAILED: &str = "Error al cargar mascotas";
pub const ADD_PET_FAILED: &str = "Error al agregar mascota";
pub const UPDATE_PET_FAILED: &str = "Error al actualizar mascota";
pub const DELETE_PET_FAILED: &str = "Error al eliminar mascota";

pub const EMPTY_LOGIN_RESPONSE: &str = "Respuesta de login vacía.";
pub const EMPTY_RESPONSE: &str = "Respuesta vacía del servidor";
