//! Semantic tables: event names, gateway intents, embed colors and the
//! DisChord name-translation layer.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

/// Spanish event names to Seyfert event names.
pub static EVENTS: Lazy<FxHashMap<&'static str, &'static str>> = Lazy::new(|| {
    FxHashMap::from_iter([
        ("encendido", "botReady"),
        ("mensaje", "messageCreate"),
        ("mensajeCreado", "messageCreate"),
        ("mensajeBorrado", "messageDelete"),
        ("mensajeEditado", "messageUpdate"),
        ("canalCreado", "channelCreate"),
        ("canalBorrado", "channelDelete"),
        ("canalEditado", "channelUpdate"),
        ("ban", "guildBanAdd"),
        ("unban", "guildBanRemove"),
        ("invitado", "guildCreate"),
        ("expulsado", "guildDelete"),
        ("entradaMiembro", "guildMemberAdd"),
        ("idaMiembro", "guildMemberRemove"),
        ("rolCreado", "guildRoleCreate"),
        ("rolBorrado", "guildRoleDelete"),
        ("rolEditado", "guildRoleUpdate"),
        ("limitado", "rateLimited"),
        ("interaccion", "interactionCreate"),
    ])
});

/// Spanish intent names to `GatewayIntentBits` members.
pub static INTENTS: Lazy<FxHashMap<&'static str, &'static str>> = Lazy::new(|| {
    FxHashMap::from_iter([
        ("ConfiguracionDelAutomoderador", "AutoModeratorConfiguration"),
        ("EjecucionDelAutomoderador", "AutoModerationExecution"),
        ("EncuestasPorPrivado", "DirectMessagePolls"),
        ("ReaccionesPorPrivado", "DirectMessageReactions"),
        ("EscribiendoPorPrivado", "DirectMessageTyping"),
        ("MensajesDirectos", "DirectMessages"),
        ("ExpresionesDelServidor", "GuildExpressions"),
        ("IntegracionesDelServidor", "GuildIntegrations"),
        ("InvitacionesDelServidor", "GuildInvites"),
        ("MiembrosDelServidor", "GuildMembers"),
        ("Miembros", "GuildMembers"),
        ("EncuestasDelServidor", "GuildPolls"),
        ("ReaccionesEnServidor", "GuildMessageReactions"),
        ("EscribiendoEnElServidor", "GuildMessageTyping"),
        ("MensajesDelServidor", "GuildMessages"),
        ("Mensajes", "GuildMessages"),
        ("ModeracionDelServidor", "GuildModeration"),
        ("EstadosDelServidor", "GuildPresences"),
        ("EventosProgramadosDelServidor", "GuildScheduledEvents"),
        ("EstadosDeVozDelServidor", "GuildVoiceStates"),
        ("WebhooksDelServidor", "GuildWebhooks"),
        ("Servidores", "Guilds"),
        ("ContenidoDelMensaje", "MessageContent"),
        ("ContenidoMensajes", "MessageContent"),
    ])
});

/// Spanish embed color names to Seyfert `EmbedColors` members.
pub static EMBED_COLORS: Lazy<FxHashMap<&'static str, &'static str>> = Lazy::new(|| {
    FxHashMap::from_iter([
        ("Aqua", "Aqua"),
        ("Azul", "Blue"),
        ("Desenfocado", "Blurple"),
        ("AquaOscuro", "DarkAqua"),
        ("AzulOscuro", "DarkBlue"),
        ("Oscuro", "DarkButNotBlack"),
        ("OroOscuro", "DarkGold"),
        ("VerdeOscuro", "DarkGreen"),
        ("GrisOscuro", "DarkGrey"),
        ("AzulMarinoOscuro", "DarkNavy"),
        ("NaranjaOscuro", "DarkOrange"),
        ("MoradoOscuro", "DarkPurple"),
        ("RojoOscuro", "DarkRed"),
        ("RosaVividoOscuro", "DarkVividPink"),
        ("GrisMuyOscuro", "DarkerGrey"),
        ("Predeterminado", "Default"),
        ("DiscordOscuro", "DiscordDark"),
        ("DiscordClaro", "DiscordLight"),
        ("Fucsia", "Fuchsia"),
        ("Oro", "Gold"),
        ("Verde", "Green"),
        ("Gris", "Grey"),
        ("GrisPurpura", "Greyple"),
        ("GrisClaro", "LightGrey"),
        ("RosaVividoLuminoso", "LuminousVividPink"),
        ("AzulMarino", "Navy"),
        ("CasiNegro", "NotQuiteBlack"),
        ("Naranja", "Orange"),
        ("Morado", "Purple"),
        ("Aleatorio", "Random"),
        ("Rojo", "Red"),
        ("Blanco", "White"),
        ("Amarillo", "Yellow"),
    ])
});

/// Member accesses rewritten ahead of the base corelib,
/// keyed by `(object, property)`.
pub static ACCESS: Lazy<FxHashMap<(&'static str, &'static str), &'static str>> =
    Lazy::new(|| FxHashMap::from_iter([(("usuario", "nombre"), "usuario.username")]));

/// Bare calls rewritten ahead of the base corelib. `client` is the binding
/// the bot bootstrap declares, so the rewrite resolves in handler scope.
pub static CALLS: Lazy<FxHashMap<&'static str, &'static str>> =
    Lazy::new(|| FxHashMap::from_iter([("imprimir", "client.logger.info")]));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(EVENTS.get("encendido"), Some(&"botReady"));
        assert_eq!(EVENTS.get("mensajeCreado"), Some(&"messageCreate"));
        assert_eq!(EVENTS.get("inexistente"), None);
    }

    #[test]
    fn test_intent_aliases() {
        // Short and long forms resolve to the same intent
        assert_eq!(INTENTS.get("Mensajes"), INTENTS.get("MensajesDelServidor"));
        assert_eq!(
            INTENTS.get("ContenidoMensajes"),
            INTENTS.get("ContenidoDelMensaje")
        );
    }

    #[test]
    fn test_embed_colors() {
        assert_eq!(EMBED_COLORS.get("Rojo"), Some(&"Red"));
        assert_eq!(EMBED_COLORS.get("Aleatorio"), Some(&"Random"));
    }
}
