// User facing texts and reply keyboard labels

pub const REGISTER_BUTTON: &str = "Регистрация";
pub const CANCEL_BUTTON: &str = "Отменить регистрацию";
pub const YES_STOP_BUTTON: &str = "Да";
pub const NO_STOP_BUTTON: &str = "Нет";
pub const TEAM_BUTTON: &str = "Есть команда";
pub const SOLO_BUTTON: &str = "Играю один";
pub const ADD_TEAMMATE_BUTTON: &str = "Добавить сокомандника";
pub const TEAM_DONE_BUTTON: &str = "Завершить";

pub const GAME_OPTIONS: [&str; 2] = ["Dota 2", "CS"];

pub const START: &str = "Привет! Этот бот регистрирует участников на киберспортивный турнир.\n\
    Нажмите «Регистрация» или отправьте /register, чтобы начать.";

pub const HELP: &str = "<b>Регистрация на турнир</b>\n\
    Бот по очереди попросит ФИО, номер группы, ссылку на профиль Steam, \
    фотографию студенческого билета и дисциплину. \
    После этого можно зарегистрироваться одному или собрать команду.\n\
    Прервать регистрацию можно в любой момент командой /cancel.";

pub const IDLE_HINT: &str = "Чтобы зарегистрироваться на турнир, \
    нажмите «Регистрация» или отправьте /register.";
pub const ALREADY_REGISTERING: &str = "Регистрация уже идёт. Завершите её или отправьте /cancel.";
pub const NOTHING_TO_CANCEL: &str = "Сейчас нечего отменять.";

pub const CONFIRM_CANCEL: &str = "Вы точно хотите прекратить процесс регистрации?";
pub const REGISTRATION_STOPPED: &str = "Регистрация прекращена";
pub const REGISTRATION_RESUMED: &str = "Продолжайте регистрацию";

pub const INVALID_FORMAT: &str = "Данные введены в неверном формате";
pub const UNKNOWN_COMMAND: &str = "Неизвестная команда";
pub const FAILURE: &str = "Не удалось сохранить данные. Попробуйте отправить их ещё раз.";
pub const DATA_SAVED: &str = "Данные сохранены.";

pub const REGISTRATION_STARTED: &str = "Начата регистрация на турнир.";
pub const ASK_NAME: &str = "Напишите ваше ФИО.";
pub const ASK_GROUP: &str = "Введите номер группы.";
pub const ASK_STEAM_LINK: &str = "Введите ссылку на профиль STEAM.";
pub const ASK_PHOTO: &str = "Прикрепите фотографию студенческого для верификации.";
pub const ASK_GAME: &str = "Выберите дисциплину для турнира.";
pub const ASK_TEAM_OR_SOLO: &str = "У вас есть команда?";
pub const ASK_TEAM_NAME: &str = "Введите название вашей команды.";
pub const ASK_TEAMMATES: &str = "Теперь можете добавить сокомандников.";
pub const ASK_TEAMMATE_DATA: &str = "Введите данные сокомандника в формате:\n\
    ФИО\n\
    группа\n\
    ссылка на Стим\n\
    никнейм в Тг\n\
    Фото студенческого билета приложите в этом же сообщении вложением.";
pub const ASK_COMBINED_MESSAGE: &str = "Пожалуйста, в одном сообщении \
    отправьте текст с данными и фото студенческого.";

pub const SOLO_REGISTERED: &str = "Регистрация завершена!";

pub fn game_selected(game: &str) -> String {
    format!("Выбрана дисциплина {}", game)
}

pub fn teammate_added(name: &str, count: usize) -> String {
    format!(
        "Сокомандник {} добавлен. Всего сокомандников: {}",
        teloxide::utils::html::escape(name),
        count
    )
}

pub fn team_registered(team_name: &str, teammates: usize) -> String {
    format!(
        "Команда <b>{}</b> добавлена! Сокомандников: {}",
        teloxide::utils::html::escape(team_name),
        teammates
    )
}
