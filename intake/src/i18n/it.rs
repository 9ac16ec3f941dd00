// Italian catalog (partial; missing entries fall back to French)

pub(super) const ENTRIES: &[(&str, &str)] = &[
    ("ui.app_title", "Consulenza di medicina dei viaggi"),
    ("ui.back", "Indietro"),
    ("ui.next", "Avanti"),
    ("ui.submit", "Invia"),
    ("ui.cancel", "Annulla"),
    ("ui.close", "Chiudi"),
    ("ui.step_of", "Passo {current} di {total}"),
    ("ui.draft_saved", "Bozza salvata"),
    ("ui.submitting", "Invio in corso..."),
    ("ui.submitted_title", "Grazie!"),
    ("ui.submitted_body", "Il questionario è stato inviato. La contatteremo per fissare un appuntamento."),
    ("ui.submit_failed", "Invio non riuscito: {error}"),
    ("ui.access_denied", "Questo link non è valido o è scaduto."),
    ("ui.yes", "Sì"),
    ("ui.no", "No"),
    ("ui.country", "Paese"),
    ("ui.departure", "Partenza"),
    ("ui.return", "Ritorno"),
    ("ui.language", "Lingua"),
    ("steps.identity", "Identità"),
    ("steps.travel", "Viaggio"),
    ("steps.health", "Salute"),
    ("steps.vaccination", "Vaccinazioni"),
    ("steps.referral", "Medico curante"),
    ("steps.summary", "Riepilogo"),
    ("fields.full_name", "Nome e cognome"),
    ("fields.birthdate", "Data di nascita (AAAA-MM-GG)"),
    ("fields.email", "Indirizzo e-mail"),
    ("fields.gender", "Sesso"),
    ("fields.weight", "Peso (kg)"),
    ("options.gender.male", "Uomo"),
    ("options.gender.female", "Donna"),
    ("options.gender.other", "Altro"),
    ("options.yes_no.yes", "Sì"),
    ("options.yes_no.no", "No"),
    ("errors.required", "Campo obbligatorio."),
    ("errors.invalid_email", "Indirizzo e-mail non valido."),
    ("errors.invalid_date", "Data non valida (formato AAAA-MM-GG)."),
    ("errors.departure_after_return", "La data di partenza è successiva alla data di ritorno."),
    ("errors.vaccination_required", "Alleghi il libretto delle vaccinazioni o selezioni «nessun libretto»."),
    ("errors.consent_required", "Il consenso è necessario per inviare il modulo."),
];
