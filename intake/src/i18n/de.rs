// German catalog (partial; missing entries fall back to French)

pub(super) const ENTRIES: &[(&str, &str)] = &[
    ("ui.app_title", "Reisemedizinische Sprechstunde"),
    ("ui.back", "Zurück"),
    ("ui.next", "Weiter"),
    ("ui.submit", "Absenden"),
    ("ui.cancel", "Abbrechen"),
    ("ui.close", "Schliessen"),
    ("ui.step_of", "Schritt {current} von {total}"),
    ("ui.draft_saved", "Entwurf gespeichert"),
    ("ui.submitting", "Wird gesendet..."),
    ("ui.submitted_title", "Vielen Dank!"),
    ("ui.submitted_body", "Ihr Fragebogen wurde übermittelt. Wir melden uns für einen Termin."),
    ("ui.submit_failed", "Senden fehlgeschlagen: {error}"),
    ("ui.access_denied", "Dieser Link ist ungültig oder abgelaufen."),
    ("ui.validation_failed", "Bitte korrigieren Sie die markierten Felder."),
    ("ui.yes", "Ja"),
    ("ui.no", "Nein"),
    ("ui.add_destination", "Reiseziel hinzufügen"),
    ("ui.remove_destination", "Entfernen"),
    ("ui.country", "Land"),
    ("ui.departure", "Abreise"),
    ("ui.return", "Rückkehr"),
    ("ui.search_country", "Mindestens 2 Buchstaben eingeben"),
    ("ui.no_results", "Keine Treffer"),
    ("ui.attached_files", "Angehängte Dateien"),
    ("ui.no_files", "Keine Dateien angehängt"),
    ("ui.language", "Sprache"),
    ("ui.schedule_doses", "{count} Dosis/Dosen (Tage {days})"),
    ("ui.schedule_booster", "Auffrischung alle {years} Jahre"),
    ("ui.schedule_lifelong", "lebenslanger Schutz"),
    ("steps.identity", "Personalien"),
    ("steps.travel", "Reise"),
    ("steps.health", "Gesundheit"),
    ("steps.vaccination", "Impfungen"),
    ("steps.referral", "Hausarzt"),
    ("steps.summary", "Zusammenfassung"),
    ("fields.full_name", "Name und Vorname"),
    ("fields.birthdate", "Geburtsdatum (JJJJ-MM-TT)"),
    ("fields.email", "E-Mail-Adresse"),
    ("fields.phone", "Telefon"),
    ("fields.gender", "Geschlecht"),
    ("fields.destinations", "Reiseziele"),
    ("fields.weight", "Gewicht (kg)"),
    ("fields.allergy", "Allergien"),
    ("fields.comorbidities", "Chronische Krankheiten"),
    ("fields.medication", "Medikamente"),
    ("fields.consent", "Einwilligung"),
    ("options.gender.male", "Mann"),
    ("options.gender.female", "Frau"),
    ("options.gender.other", "Divers"),
    ("options.yes_no.yes", "Ja"),
    ("options.yes_no.no", "Nein"),
    ("options.yes_no_unknown.yes", "Ja"),
    ("options.yes_no_unknown.no", "Nein"),
    ("options.yes_no_unknown.unknown", "Weiss nicht"),
    ("errors.required", "Dieses Feld ist obligatorisch."),
    ("errors.name_too_short", "Der Name muss mindestens 2 Zeichen lang sein."),
    ("errors.invalid_date", "Ungültiges Datum (Format JJJJ-MM-TT)."),
    ("errors.birthdate_in_future", "Das Geburtsdatum darf nicht in der Zukunft liegen."),
    ("errors.invalid_email", "Ungültige E-Mail-Adresse."),
    ("errors.destination_required", "Geben Sie mindestens ein Reiseziel mit Daten an."),
    ("errors.departure_after_return", "Das Abreisedatum liegt nach dem Rückkehrdatum."),
    ("errors.select_at_least_one", "Wählen Sie mindestens eine Option."),
    ("errors.weight_positive", "Das Gewicht muss grösser als 0 sein."),
    ("errors.details_required", "Bitte präzisieren."),
    ("errors.vaccination_required", "Impfausweis anhängen oder «kein Impfausweis» ankreuzen."),
    ("errors.consent_required", "Ihre Einwilligung ist erforderlich."),
    ("errors.too_many_files", "Zu viele Dateien (maximal {max})."),
    ("errors.file_too_large", "«{name}» überschreitet die Maximalgrösse von {max}."),
    ("errors.file_type_not_allowed", "«{name}»: Dateityp nicht erlaubt."),
];
