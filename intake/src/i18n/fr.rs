// French catalog (default language, complete)

pub(super) const ENTRIES: &[(&str, &str)] = &[
    // ui
    ("ui.app_title", "Consultation de médecine des voyages"),
    ("ui.back", "Précédent"),
    ("ui.next", "Suivant"),
    ("ui.submit", "Envoyer"),
    ("ui.cancel", "Annuler"),
    ("ui.close", "Fermer"),
    ("ui.step_of", "Étape {current} sur {total}"),
    ("ui.draft_saved", "Brouillon enregistré"),
    ("ui.submitting", "Envoi en cours..."),
    ("ui.submitted_title", "Merci !"),
    ("ui.submitted_body", "Votre questionnaire a bien été transmis. Nous vous contacterons pour fixer un rendez-vous."),
    ("ui.submit_failed", "L'envoi a échoué : {error}"),
    ("ui.access_denied", "Ce lien n'est pas valide ou a expiré."),
    ("ui.validation_failed", "Veuillez corriger les champs signalés."),
    ("ui.yes", "Oui"),
    ("ui.no", "Non"),
    ("ui.add_destination", "Ajouter une destination"),
    ("ui.remove_destination", "Supprimer"),
    ("ui.country", "Pays"),
    ("ui.departure", "Départ"),
    ("ui.return", "Retour"),
    ("ui.search_country", "Tapez au moins 2 lettres"),
    ("ui.no_results", "Aucun résultat"),
    ("ui.attach_hint", "Chemin du fichier (PDF, JPEG, PNG, HEIC), Entrée pour joindre"),
    ("ui.attached_files", "Fichiers joints"),
    ("ui.no_files", "Aucun fichier joint"),
    ("ui.summary_empty", "Aucune réponse"),
    ("ui.consent_text", "Je confirme l'exactitude de ces informations et accepte leur traitement par le centre de vaccination."),
    ("ui.language", "Langue"),
    ("ui.help", "Tab/↑↓ naviguer · Espace cocher · ←→ choisir · PgSuiv/PgPréc étape · F2 langue · Échap annuler"),
    ("ui.confirm_cancel_title", "Quitter le questionnaire ?"),
    ("ui.confirm_cancel_body", "Les réponses non enregistrées seront perdues. Quitter quand même ?"),
    ("ui.schedule_doses", "{count} dose(s) (jours {days})"),
    ("ui.schedule_booster", "rappel tous les {years} ans"),
    ("ui.schedule_lifelong", "protection à vie"),
    // steps
    ("steps.identity", "Identité"),
    ("steps.travel", "Voyage"),
    ("steps.health", "Santé"),
    ("steps.vaccination", "Vaccinations"),
    ("steps.referral", "Médecin traitant"),
    ("steps.summary", "Récapitulatif"),
    // fields
    ("fields.full_name", "Nom et prénom"),
    ("fields.birthdate", "Date de naissance (AAAA-MM-JJ)"),
    ("fields.email", "Adresse e-mail"),
    ("fields.phone", "Téléphone"),
    ("fields.gender", "Sexe"),
    ("fields.street", "Rue et numéro"),
    ("fields.postal_code", "NPA"),
    ("fields.city", "Localité"),
    ("fields.destinations", "Destinations"),
    ("fields.travel_reasons", "Motif du voyage"),
    ("fields.travel_reasons_other", "Autre motif"),
    ("fields.accommodation", "Hébergement"),
    ("fields.activities", "Activités prévues"),
    ("fields.activities_other", "Autre activité"),
    ("fields.rural_stay", "Séjour en zone rurale"),
    ("fields.travel_comments", "Remarques sur le voyage"),
    ("fields.weight", "Poids (kg)"),
    ("fields.reproductive_questions", "Souhaitez-vous répondre aux questions sur la grossesse ?"),
    ("fields.pregnant", "Enceinte ou grossesse prévue"),
    ("fields.breastfeeding", "Allaitement"),
    ("fields.allergy", "Allergies"),
    ("fields.allergy_details", "Précisez les allergies"),
    ("fields.dengue_history", "Antécédent de dengue"),
    ("fields.chickenpox_disease", "Varicelle déjà contractée"),
    ("fields.chickenpox_vaccine", "Vacciné(e) contre la varicelle"),
    ("fields.vaccination_adverse_event", "Réaction après une vaccination"),
    ("fields.vaccination_adverse_event_details", "Décrivez la réaction"),
    ("fields.comorbidities", "Maladies chroniques"),
    ("fields.chemotherapy", "Chimiothérapie en cours ou récente"),
    ("fields.comorbidities_other", "Autre maladie"),
    ("fields.medication", "Prise de médicaments"),
    ("fields.medication_list", "Liste des médicaments"),
    ("fields.no_vaccination_card", "Je n'ai pas de carnet de vaccination"),
    ("fields.previous_vaccines", "Vaccins de voyage déjà reçus"),
    ("fields.vaccination_comments", "Remarques sur les vaccinations"),
    ("fields.referring_doctor", "Médecin traitant"),
    ("fields.referring_doctor_email", "E-mail du médecin traitant"),
    ("fields.referral_source", "Comment nous avez-vous connus ?"),
    ("fields.remarks", "Remarques"),
    ("fields.consent", "Consentement"),
    // options
    ("options.gender.male", "Homme"),
    ("options.gender.female", "Femme"),
    ("options.gender.other", "Autre"),
    ("options.yes_no.yes", "Oui"),
    ("options.yes_no.no", "Non"),
    ("options.yes_no_unknown.yes", "Oui"),
    ("options.yes_no_unknown.no", "Non"),
    ("options.yes_no_unknown.unknown", "Je ne sais pas"),
    ("options.travel_reasons.tourism", "Tourisme"),
    ("options.travel_reasons.business", "Affaires"),
    ("options.travel_reasons.visiting_relatives", "Visite à la famille ou aux amis"),
    ("options.travel_reasons.humanitarian", "Mission humanitaire"),
    ("options.travel_reasons.studies", "Études"),
    ("options.travel_reasons.other", "Autre"),
    ("options.accommodation.hotel", "Hôtel"),
    ("options.accommodation.hostel", "Auberge"),
    ("options.accommodation.camping", "Camping"),
    ("options.accommodation.local_family", "Chez l'habitant"),
    ("options.accommodation.rental", "Location"),
    ("options.accommodation.other", "Autre"),
    ("options.activities.none", "Aucune de ces activités"),
    ("options.activities.hiking", "Randonnée"),
    ("options.activities.high_altitude", "Séjour en haute altitude (> 2500 m)"),
    ("options.activities.diving", "Plongée"),
    ("options.activities.water_sports", "Baignade en eau douce"),
    ("options.activities.animal_contact", "Contact avec des animaux"),
    ("options.activities.caving", "Spéléologie"),
    ("options.activities.healthcare_work", "Travail en milieu de soins"),
    ("options.activities.other", "Autre"),
    ("options.comorbidities.none", "Aucune"),
    ("options.comorbidities.diabetes", "Diabète"),
    ("options.comorbidities.heart_disease", "Maladie cardiaque"),
    ("options.comorbidities.lung_disease", "Maladie pulmonaire"),
    ("options.comorbidities.kidney_disease", "Maladie rénale"),
    ("options.comorbidities.liver_disease", "Maladie du foie"),
    ("options.comorbidities.hiv", "VIH"),
    ("options.comorbidities.cancer", "Cancer"),
    ("options.comorbidities.autoimmune", "Maladie auto-immune"),
    ("options.comorbidities.immunosuppression", "Traitement immunosuppresseur"),
    ("options.comorbidities.asplenia", "Absence de rate"),
    ("options.comorbidities.other", "Autre"),
    ("options.previous_vaccines.yellow_fever", "Fièvre jaune"),
    ("options.previous_vaccines.hepatitis_a", "Hépatite A"),
    ("options.previous_vaccines.hepatitis_b", "Hépatite B"),
    ("options.previous_vaccines.typhoid", "Fièvre typhoïde"),
    ("options.previous_vaccines.rabies", "Rage"),
    ("options.previous_vaccines.japanese_encephalitis", "Encéphalite japonaise"),
    ("options.previous_vaccines.tick_borne_encephalitis", "Encéphalite à tiques"),
    ("options.previous_vaccines.meningococcal_acwy", "Méningocoques ACWY"),
    ("options.previous_vaccines.cholera", "Choléra"),
    ("options.previous_vaccines.dengue", "Dengue"),
    ("options.previous_vaccines.dtpa", "Diphtérie-tétanos-coqueluche"),
    ("options.previous_vaccines.polio", "Poliomyélite"),
    ("options.previous_vaccines.mmr", "Rougeole-oreillons-rubéole"),
    ("options.previous_vaccines.varicella", "Varicelle"),
    ("options.previous_vaccines.influenza", "Grippe"),
    ("options.previous_vaccines.covid19", "COVID-19"),
    ("options.referral_source.doctor", "Mon médecin"),
    ("options.referral_source.website", "Site internet"),
    ("options.referral_source.friend", "Bouche-à-oreille"),
    ("options.referral_source.employer", "Mon employeur"),
    ("options.referral_source.other", "Autre"),
    // errors
    ("errors.required", "Ce champ est obligatoire."),
    ("errors.name_too_short", "Le nom doit comporter au moins 2 caractères."),
    ("errors.invalid_date", "Date invalide (format AAAA-MM-JJ)."),
    ("errors.birthdate_in_future", "La date de naissance ne peut pas être dans le futur."),
    ("errors.invalid_email", "Adresse e-mail invalide."),
    ("errors.destination_required", "Indiquez au moins une destination avec ses dates."),
    ("errors.departure_after_return", "La date de départ est postérieure à la date de retour."),
    ("errors.select_at_least_one", "Sélectionnez au moins une option."),
    ("errors.weight_positive", "Le poids doit être supérieur à 0."),
    ("errors.details_required", "Merci de préciser."),
    ("errors.vaccination_required", "Joignez votre carnet de vaccination ou cochez « pas de carnet »."),
    ("errors.consent_required", "Votre consentement est nécessaire pour envoyer le formulaire."),
    ("errors.too_many_files", "Trop de fichiers (maximum {max})."),
    ("errors.file_too_large", "« {name} » dépasse la taille maximale de {max}."),
    ("errors.file_type_not_allowed", "« {name} » : type de fichier non autorisé."),
    ("errors.file_unreadable", "« {name} » n'a pas pu être lu."),
    ("errors.missing_token", "Lien d'accès manquant."),
];
