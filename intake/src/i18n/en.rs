// English catalog (complete)

pub(super) const ENTRIES: &[(&str, &str)] = &[
    // ui
    ("ui.app_title", "Travel medicine consultation"),
    ("ui.back", "Back"),
    ("ui.next", "Next"),
    ("ui.submit", "Submit"),
    ("ui.cancel", "Cancel"),
    ("ui.close", "Close"),
    ("ui.step_of", "Step {current} of {total}"),
    ("ui.draft_saved", "Draft saved"),
    ("ui.submitting", "Submitting..."),
    ("ui.submitted_title", "Thank you!"),
    ("ui.submitted_body", "Your questionnaire has been sent. We will contact you to schedule an appointment."),
    ("ui.submit_failed", "Submission failed: {error}"),
    ("ui.access_denied", "This link is invalid or has expired."),
    ("ui.validation_failed", "Please correct the highlighted fields."),
    ("ui.yes", "Yes"),
    ("ui.no", "No"),
    ("ui.add_destination", "Add a destination"),
    ("ui.remove_destination", "Remove"),
    ("ui.country", "Country"),
    ("ui.departure", "Departure"),
    ("ui.return", "Return"),
    ("ui.search_country", "Type at least 2 letters"),
    ("ui.no_results", "No results"),
    ("ui.attach_hint", "File path (PDF, JPEG, PNG, HEIC), Enter to attach"),
    ("ui.attached_files", "Attached files"),
    ("ui.no_files", "No files attached"),
    ("ui.summary_empty", "No answers"),
    ("ui.consent_text", "I confirm this information is accurate and agree to its processing by the travel clinic."),
    ("ui.language", "Language"),
    ("ui.help", "Tab/↑↓ move · Space toggle · ←→ choose · PgDn/PgUp step · F2 language · Esc cancel"),
    ("ui.confirm_cancel_title", "Leave the questionnaire?"),
    ("ui.confirm_cancel_body", "Unsaved answers will be lost. Leave anyway?"),
    ("ui.schedule_doses", "{count} dose(s) (days {days})"),
    ("ui.schedule_booster", "booster every {years} years"),
    ("ui.schedule_lifelong", "lifelong protection"),
    // steps
    ("steps.identity", "Identity"),
    ("steps.travel", "Travel"),
    ("steps.health", "Health"),
    ("steps.vaccination", "Vaccinations"),
    ("steps.referral", "Referring doctor"),
    ("steps.summary", "Summary"),
    // fields
    ("fields.full_name", "Full name"),
    ("fields.birthdate", "Date of birth (YYYY-MM-DD)"),
    ("fields.email", "Email address"),
    ("fields.phone", "Phone"),
    ("fields.gender", "Sex"),
    ("fields.street", "Street and number"),
    ("fields.postal_code", "Postal code"),
    ("fields.city", "City"),
    ("fields.destinations", "Destinations"),
    ("fields.travel_reasons", "Reason for travel"),
    ("fields.travel_reasons_other", "Other reason"),
    ("fields.accommodation", "Accommodation"),
    ("fields.activities", "Planned activities"),
    ("fields.activities_other", "Other activity"),
    ("fields.rural_stay", "Stay in rural areas"),
    ("fields.travel_comments", "Travel remarks"),
    ("fields.weight", "Weight (kg)"),
    ("fields.reproductive_questions", "Would you like to answer the pregnancy questions?"),
    ("fields.pregnant", "Pregnant or planning a pregnancy"),
    ("fields.breastfeeding", "Breastfeeding"),
    ("fields.allergy", "Allergies"),
    ("fields.allergy_details", "Describe your allergies"),
    ("fields.dengue_history", "Previous dengue infection"),
    ("fields.chickenpox_disease", "Had chickenpox"),
    ("fields.chickenpox_vaccine", "Vaccinated against chickenpox"),
    ("fields.vaccination_adverse_event", "Reaction after a vaccination"),
    ("fields.vaccination_adverse_event_details", "Describe the reaction"),
    ("fields.comorbidities", "Chronic conditions"),
    ("fields.chemotherapy", "Current or recent chemotherapy"),
    ("fields.comorbidities_other", "Other condition"),
    ("fields.medication", "Taking medication"),
    ("fields.medication_list", "Medication list"),
    ("fields.no_vaccination_card", "I do not have a vaccination card"),
    ("fields.previous_vaccines", "Travel vaccines already received"),
    ("fields.vaccination_comments", "Vaccination remarks"),
    ("fields.referring_doctor", "Referring doctor"),
    ("fields.referring_doctor_email", "Referring doctor's email"),
    ("fields.referral_source", "How did you hear about us?"),
    ("fields.remarks", "Remarks"),
    ("fields.consent", "Consent"),
    // options
    ("options.gender.male", "Male"),
    ("options.gender.female", "Female"),
    ("options.gender.other", "Other"),
    ("options.yes_no.yes", "Yes"),
    ("options.yes_no.no", "No"),
    ("options.yes_no_unknown.yes", "Yes"),
    ("options.yes_no_unknown.no", "No"),
    ("options.yes_no_unknown.unknown", "I don't know"),
    ("options.travel_reasons.tourism", "Tourism"),
    ("options.travel_reasons.business", "Business"),
    ("options.travel_reasons.visiting_relatives", "Visiting friends or relatives"),
    ("options.travel_reasons.humanitarian", "Humanitarian mission"),
    ("options.travel_reasons.studies", "Studies"),
    ("options.travel_reasons.other", "Other"),
    ("options.accommodation.hotel", "Hotel"),
    ("options.accommodation.hostel", "Hostel"),
    ("options.accommodation.camping", "Camping"),
    ("options.accommodation.local_family", "With a local family"),
    ("options.accommodation.rental", "Rental"),
    ("options.accommodation.other", "Other"),
    ("options.activities.none", "None of these"),
    ("options.activities.hiking", "Hiking"),
    ("options.activities.high_altitude", "High altitude (> 2500 m)"),
    ("options.activities.diving", "Diving"),
    ("options.activities.water_sports", "Freshwater swimming"),
    ("options.activities.animal_contact", "Contact with animals"),
    ("options.activities.caving", "Caving"),
    ("options.activities.healthcare_work", "Work in a healthcare setting"),
    ("options.activities.other", "Other"),
    ("options.comorbidities.none", "None"),
    ("options.comorbidities.diabetes", "Diabetes"),
    ("options.comorbidities.heart_disease", "Heart disease"),
    ("options.comorbidities.lung_disease", "Lung disease"),
    ("options.comorbidities.kidney_disease", "Kidney disease"),
    ("options.comorbidities.liver_disease", "Liver disease"),
    ("options.comorbidities.hiv", "HIV"),
    ("options.comorbidities.cancer", "Cancer"),
    ("options.comorbidities.autoimmune", "Autoimmune disease"),
    ("options.comorbidities.immunosuppression", "Immunosuppressive treatment"),
    ("options.comorbidities.asplenia", "No spleen"),
    ("options.comorbidities.other", "Other"),
    ("options.previous_vaccines.yellow_fever", "Yellow fever"),
    ("options.previous_vaccines.hepatitis_a", "Hepatitis A"),
    ("options.previous_vaccines.hepatitis_b", "Hepatitis B"),
    ("options.previous_vaccines.typhoid", "Typhoid fever"),
    ("options.previous_vaccines.rabies", "Rabies"),
    ("options.previous_vaccines.japanese_encephalitis", "Japanese encephalitis"),
    ("options.previous_vaccines.tick_borne_encephalitis", "Tick-borne encephalitis"),
    ("options.previous_vaccines.meningococcal_acwy", "Meningococcal ACWY"),
    ("options.previous_vaccines.cholera", "Cholera"),
    ("options.previous_vaccines.dengue", "Dengue"),
    ("options.previous_vaccines.dtpa", "Diphtheria-tetanus-pertussis"),
    ("options.previous_vaccines.polio", "Polio"),
    ("options.previous_vaccines.mmr", "Measles-mumps-rubella"),
    ("options.previous_vaccines.varicella", "Chickenpox"),
    ("options.previous_vaccines.influenza", "Influenza"),
    ("options.previous_vaccines.covid19", "COVID-19"),
    ("options.referral_source.doctor", "My doctor"),
    ("options.referral_source.website", "Website"),
    ("options.referral_source.friend", "Word of mouth"),
    ("options.referral_source.employer", "My employer"),
    ("options.referral_source.other", "Other"),
    // errors
    ("errors.required", "This field is required."),
    ("errors.name_too_short", "The name must be at least 2 characters long."),
    ("errors.invalid_date", "Invalid date (format YYYY-MM-DD)."),
    ("errors.birthdate_in_future", "The date of birth cannot be in the future."),
    ("errors.invalid_email", "Invalid email address."),
    ("errors.destination_required", "Enter at least one destination with its dates."),
    ("errors.departure_after_return", "The departure date is after the return date."),
    ("errors.select_at_least_one", "Select at least one option."),
    ("errors.weight_positive", "Weight must be greater than 0."),
    ("errors.details_required", "Please give details."),
    ("errors.vaccination_required", "Attach your vaccination card or tick \"no vaccination card\"."),
    ("errors.consent_required", "Your consent is required to submit the form."),
    ("errors.too_many_files", "Too many files (maximum {max})."),
    ("errors.file_too_large", "\"{name}\" exceeds the maximum size of {max}."),
    ("errors.file_type_not_allowed", "\"{name}\": file type not allowed."),
    ("errors.file_unreadable", "\"{name}\" could not be read."),
    ("errors.missing_token", "Missing access link."),
];
